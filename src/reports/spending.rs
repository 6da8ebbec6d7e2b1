//! Spending Report
//!
//! Spending broken down by category and by store, optionally limited to a
//! date window.

use std::io::Write;

use crate::config::Settings;
use crate::display::report::{format_bar, format_percentage, separator, truncate};
use crate::error::GroceryResult;
use crate::expense::{self, DateWindow, GroupSummary};
use crate::models::Money;
use crate::storage::Storage;

use super::{csv_amount, csv_error};

const BAR_WIDTH: usize = 25;

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// Window the report covers; `None` for all time
    pub window: Option<DateWindow>,
    /// Whether planned (unpurchased) items were counted
    pub includes_planned: bool,
    pub categories: Vec<GroupSummary>,
    pub stores: Vec<GroupSummary>,
    pub total_spent: Money,
    pub item_count: usize,
    currency_symbol: String,
}

impl SpendingReport {
    /// Generate a spending report
    ///
    /// Purchased items only, unless `include_planned` is set. Items are
    /// placed in the window by their relevant date.
    pub fn generate(
        storage: &Storage,
        settings: &Settings,
        window: Option<DateWindow>,
        include_planned: bool,
    ) -> GroceryResult<Self> {
        let items: Vec<_> = storage
            .items
            .get_all()?
            .into_iter()
            .filter(|i| include_planned || i.purchased)
            .filter(|i| window.map_or(true, |w| w.contains(i.relevant_date())))
            .collect();

        Ok(Self {
            window,
            includes_planned: include_planned,
            categories: expense::category_summaries(&items),
            stores: expense::store_summaries(&items),
            total_spent: expense::total_spent(&items),
            item_count: items.len(),
            currency_symbol: settings.currency_symbol.clone(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        let symbol = self.currency_symbol.as_str();

        match &self.window {
            Some(window) => output.push_str(&format!("Spending Report: {}\n", window)),
            None => output.push_str("Spending Report: all time\n"),
        }
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "Total Spent: {}\n",
            self.total_spent.format_with_symbol(symbol)
        ));
        output.push_str(&format!("Items: {}", self.item_count));
        if self.includes_planned {
            output.push_str(" (including planned)");
        }
        output.push_str("\n\n");

        if self.item_count == 0 {
            output.push_str("No spending recorded.\n");
            return output;
        }

        output.push_str("BY CATEGORY\n");
        self.push_groups(&mut output, &self.categories);
        output.push_str("\nBY STORE\n");
        self.push_groups(&mut output, &self.stores);

        output
    }

    fn push_groups(&self, output: &mut String, groups: &[GroupSummary]) {
        let max = groups.first().map(|g| g.total.to_f64()).unwrap_or(0.0);
        output.push_str(&separator(70));
        output.push('\n');
        for group in groups {
            output.push_str(&format!(
                "{:<20} {} {:>11} {:>5}\n",
                truncate(&group.name, 20),
                format_bar(group.total.to_f64(), max, BAR_WIDTH),
                group.total.format_with_symbol(&self.currency_symbol),
                format_percentage(group.percentage)
            ));
        }
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> GroceryResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Group", "Name", "Amount", "Items", "Percentage"])
            .map_err(csv_error)?;

        for (label, groups) in [("category", &self.categories), ("store", &self.stores)] {
            for group in groups {
                csv.write_record([
                    label.to_string(),
                    group.name.clone(),
                    csv_amount(group.total),
                    group.item_count.to_string(),
                    format!("{:.2}", group.percentage),
                ])
                .map_err(csv_error)?;
            }
        }

        csv.write_record([
            "total".to_string(),
            String::new(),
            csv_amount(self.total_spent),
            self.item_count.to_string(),
            "100.00".to_string(),
        ])
        .map_err(csv_error)?;

        csv.flush().map_err(csv_error)?;
        Ok(())
    }

    /// The `limit` categories with the most spending
    pub fn top_categories(&self, limit: usize) -> &[GroupSummary] {
        &self.categories[..limit.min(self.categories.len())]
    }
}
