//! Budget Overview Report
//!
//! Every configured budget checked against the spending in its current
//! window, the month's expense summary and any alerts.

use std::io::Write;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::budget::{format_alerts, format_budget_check};
use crate::error::GroceryResult;
use crate::expense::{BudgetAlert, BudgetCheck, ExpenseSummary};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{csv_amount, csv_error};

#[derive(Debug, Clone)]
pub struct BudgetOverviewReport {
    pub reference: NaiveDate,
    pub checks: Vec<BudgetCheck>,
    pub summary: ExpenseSummary,
    pub alerts: Vec<BudgetAlert>,
    currency_symbol: String,
}

impl BudgetOverviewReport {
    /// Generate the overview for the windows containing `reference`
    pub fn generate(storage: &Storage, settings: &Settings, reference: NaiveDate) -> GroceryResult<Self> {
        let service = BudgetService::new(storage, settings);

        Ok(Self {
            reference,
            checks: service.status(reference)?,
            summary: service.monthly_summary(reference)?,
            alerts: service.alerts(reference)?,
            currency_symbol: settings.currency_symbol.clone(),
        })
    }

    /// True when any budget is at or past its limit
    pub fn has_overspending(&self) -> bool {
        self.checks
            .iter()
            .any(|c| c.status == crate::expense::BudgetStatus::Over)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let symbol = self.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str(&format!("Budget Overview as of {}\n", self.reference));
        output.push_str(&"=".repeat(60));
        output.push_str("\n\n");

        if self.checks.is_empty() {
            output.push_str("No budgets set.\n");
        } else {
            for check in &self.checks {
                output.push_str(&format_budget_check(check, symbol));
                output.push('\n');
            }
        }

        let summary = &self.summary;
        output.push_str(&format!("This month ({})\n", summary.window));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "  Total spent:     {}\n",
            summary.total_spent.format_with_symbol(symbol)
        ));
        output.push_str(&format!("  Items bought:    {}\n", summary.item_count));
        if let Some(average) = summary.average_item_cost {
            output.push_str(&format!(
                "  Average item:    {}\n",
                average.format_with_symbol(symbol)
            ));
        }
        if let Some((name, cost)) = &summary.most_expensive {
            output.push_str(&format!(
                "  Most expensive:  {} ({})\n",
                name,
                cost.format_with_symbol(symbol)
            ));
        }
        if let Some((name, cost)) = &summary.cheapest {
            output.push_str(&format!(
                "  Cheapest:        {} ({})\n",
                name,
                cost.format_with_symbol(symbol)
            ));
        }

        output.push('\n');
        output.push_str(&format_alerts(&self.alerts));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> GroceryResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Period", "Start", "End", "Limit", "Spent", "Remaining", "Used", "Status",
        ])
        .map_err(csv_error)?;

        for check in &self.checks {
            csv.write_record([
                check.period.to_string(),
                check.window.start.to_string(),
                check.window.last_day().to_string(),
                csv_amount(check.limit),
                csv_amount(check.spent),
                csv_amount(check.remaining),
                format!("{:.2}", check.used_percentage),
                format!("{:?}", check.status).to_lowercase(),
            ])
            .map_err(csv_error)?;
        }

        csv.flush().map_err(csv_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::BudgetStatus;
    use crate::models::{BudgetPeriod, Money};
    use crate::reports::test_support::{add, create_test_storage, date};

    #[test]
    fn test_overview() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);

        service.set(BudgetPeriod::Monthly, Money::from_cents(10000)).unwrap();
        service.set(BudgetPeriod::Weekly, Money::from_cents(2000)).unwrap();

        // 2025-03-13 is a Thursday; its Monday-based week starts on the 10th
        add(&storage, "Steak", "Meat", "Aldi", "1", "25.00", Some(date(2025, 3, 11)));
        add(&storage, "Rice", "Pantry", "Aldi", "1", "5.00", Some(date(2025, 3, 2)));

        let report = BudgetOverviewReport::generate(&storage, &settings, date(2025, 3, 13)).unwrap();

        let weekly = report
            .checks
            .iter()
            .find(|c| c.period == BudgetPeriod::Weekly)
            .unwrap();
        assert_eq!(weekly.spent, Money::from_cents(2500));
        assert_eq!(weekly.status, BudgetStatus::Over);
        assert!(report.has_overspending());

        assert_eq!(report.summary.total_spent, Money::from_cents(3000));
        assert_eq!(report.summary.item_count, 2);

        let text = report.format_terminal();
        assert!(text.contains("Weekly budget exceeded by $5.00"));
        assert!(text.contains("Most expensive:  Steak ($25.00)"));
    }

    #[test]
    fn test_csv() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        BudgetService::new(&storage, &settings)
            .set(BudgetPeriod::Monthly, Money::from_cents(10000))
            .unwrap();
        add(&storage, "Rice", "Pantry", "Aldi", "1", "95.00", Some(date(2025, 3, 2)));

        let report = BudgetOverviewReport::generate(&storage, &settings, date(2025, 3, 13)).unwrap();
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();

        assert!(csv.contains("Monthly,2025-03-01,2025-03-31,100.00,95.00,5.00,95.00,near\n"));
    }

    #[test]
    fn test_no_budgets() {
        let (_temp, storage) = create_test_storage();
        let report =
            BudgetOverviewReport::generate(&storage, &Settings::default(), date(2025, 3, 13)).unwrap();
        assert!(!report.has_overspending());
        assert!(report.format_terminal().contains("No budgets set."));
    }
}
