//! Daily spending trend

use std::io::Write;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::report::format_bar;
use crate::error::GroceryResult;
use crate::expense;
use crate::models::Money;
use crate::storage::Storage;

use super::{csv_amount, csv_error};

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone)]
pub struct TrendReport {
    /// One entry per day, oldest first, zero on days without purchases
    pub series: Vec<(NaiveDate, Money)>,
    pub total: Money,
    pub daily_average: Money,
    /// Day with the most spending (earliest on ties), if anything was spent
    pub peak: Option<(NaiveDate, Money)>,
    currency_symbol: String,
}

impl TrendReport {
    /// Purchased-item spending for the `days` days ending on `last_day`
    pub fn generate(
        storage: &Storage,
        settings: &Settings,
        last_day: NaiveDate,
        days: u32,
    ) -> GroceryResult<Self> {
        let purchased: Vec<_> = storage
            .items
            .get_all()?
            .into_iter()
            .filter(|i| i.purchased)
            .collect();

        let series = expense::daily_spending(&purchased, last_day, days.max(1));
        let total: Money = series.iter().map(|(_, amount)| *amount).sum();
        let peak = series
            .iter()
            .filter(|(_, amount)| amount.is_positive())
            .fold(None, |best: Option<(NaiveDate, Money)>, &(day, amount)| match best {
                Some((_, top)) if top >= amount => best,
                _ => Some((day, amount)),
            });

        Ok(Self {
            daily_average: total.divide(series.len()).unwrap_or_default(),
            series,
            total,
            peak,
            currency_symbol: settings.currency_symbol.clone(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let symbol = self.currency_symbol.as_str();
        let mut output = String::new();

        let (first, last) = match (self.series.first(), self.series.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => return "No days in range.\n".into(),
        };

        output.push_str(&format!("Spending Trend: {} to {}\n", first, last));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        let max = self.peak.map(|(_, amount)| amount.to_f64()).unwrap_or(0.0);
        for (day, amount) in &self.series {
            output.push_str(&format!(
                "{} {} {:>10}\n",
                day.format("%m-%d"),
                format_bar(amount.to_f64(), max, BAR_WIDTH),
                amount.format_with_symbol(symbol)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total:         {}\n", self.total.format_with_symbol(symbol)));
        output.push_str(&format!(
            "Daily average: {}\n",
            self.daily_average.format_with_symbol(symbol)
        ));
        if let Some((day, amount)) = self.peak {
            output.push_str(&format!(
                "Peak day:      {} ({})\n",
                day,
                amount.format_with_symbol(symbol)
            ));
        }

        output
    }

    /// Export the series as `Date,Amount` rows
    pub fn export_csv<W: Write>(&self, writer: W) -> GroceryResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Date", "Amount"]).map_err(csv_error)?;
        for (day, amount) in &self.series {
            csv.write_record([day.to_string(), csv_amount(*amount)])
                .map_err(csv_error)?;
        }
        csv.flush().map_err(csv_error)?;
        Ok(())
    }
}
