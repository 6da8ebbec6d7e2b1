//! Price distribution report

use std::io::Write;

use crate::config::Settings;
use crate::display::report::format_bar;
use crate::error::GroceryResult;
use crate::expense;
use crate::models::Money;
use crate::storage::Storage;

use super::{csv_amount, csv_error};

const BAR_WIDTH: usize = 30;

/// How unit prices across the list spread over the configured buckets
#[derive(Debug, Clone)]
pub struct PriceDistributionReport {
    /// Bucket label and item count, lowest bucket first
    pub buckets: Vec<(String, usize)>,
    pub item_count: usize,
    pub average_price: Option<Money>,
    pub median_price: Option<Money>,
    currency_symbol: String,
}

impl PriceDistributionReport {
    pub fn generate(storage: &Storage, settings: &Settings) -> GroceryResult<Self> {
        let items = storage.items.get_all()?;
        let buckets = settings.price_buckets()?;

        Ok(Self {
            buckets: expense::price_distribution(&items, &buckets),
            item_count: items.len(),
            average_price: expense::average_price_per_unit(&items).ok(),
            median_price: expense::median_price_per_unit(&items).ok(),
            currency_symbol: settings.currency_symbol.clone(),
        })
    }

    pub fn format_terminal(&self) -> String {
        let symbol = self.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str("Price Distribution (price per unit)\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        let max = self.buckets.iter().map(|(_, n)| *n).max().unwrap_or(0) as f64;
        for (label, count) in &self.buckets {
            output.push_str(&format!(
                "{:<14} {} {:>4}\n",
                label,
                format_bar(*count as f64, max, BAR_WIDTH),
                count
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("Items:   {}\n", self.item_count));
        if let (Some(average), Some(median)) = (self.average_price, self.median_price) {
            output.push_str(&format!("Average: {}\n", average.format_with_symbol(symbol)));
            output.push_str(&format!("Median:  {}\n", median.format_with_symbol(symbol)));
        }

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> GroceryResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Range", "Items"]).map_err(csv_error)?;
        for (label, count) in &self.buckets {
            csv.write_record([label.clone(), count.to_string()])
                .map_err(csv_error)?;
        }
        if let Some(average) = self.average_price {
            csv.write_record(["average".to_string(), csv_amount(average)])
                .map_err(csv_error)?;
        }
        csv.flush().map_err(csv_error)?;
        Ok(())
    }
}
