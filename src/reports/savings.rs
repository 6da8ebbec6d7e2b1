//! Savings report: store price comparison and optimization suggestions

use std::io::Write;

use crate::config::Settings;
use crate::display::report::{format_percentage, truncate};
use crate::error::GroceryResult;
use crate::expense::{self, StoreComparison, Suggestion};
use crate::storage::Storage;

use super::{csv_amount, csv_error};

#[derive(Debug, Clone)]
pub struct SavingsReport {
    pub comparisons: Vec<StoreComparison>,
    pub suggestions: Vec<Suggestion>,
    currency_symbol: String,
}

impl SavingsReport {
    /// Compare stores across the whole list; suggestions use purchased items
    pub fn generate(storage: &Storage, settings: &Settings) -> GroceryResult<Self> {
        let items = storage.items.get_all()?;
        let purchased: Vec<_> = items.iter().filter(|i| i.purchased).collect();

        let mut comparisons = expense::store_comparison(&items);
        comparisons.sort_by(|a, b| {
            b.potential_savings
                .cmp(&a.potential_savings)
                .then_with(|| a.item.cmp(&b.item))
        });

        Ok(Self {
            comparisons,
            suggestions: expense::optimization_suggestions(purchased),
            currency_symbol: settings.currency_symbol.clone(),
        })
    }

    fn describe(&self, suggestion: &Suggestion) -> String {
        let symbol = self.currency_symbol.as_str();
        match suggestion {
            Suggestion::ExpensiveItem {
                item, price, store, ..
            } => format!(
                "{} costs {} per unit at {}; try a different store or look for sales",
                item,
                price.format_with_symbol(symbol),
                store
            ),
            Suggestion::HighSpendingCategory {
                category,
                total_spent,
            } => format!(
                "{} spending is high ({}); consider cutting back or buying in bulk",
                category,
                total_spent.format_with_symbol(symbol)
            ),
        }
    }

    pub fn format_terminal(&self) -> String {
        let symbol = self.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str("Store Price Comparison\n");
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if self.comparisons.is_empty() {
            output.push_str("No items are listed at more than one store.\n");
        } else {
            output.push_str(&format!(
                "{:<20} {:<22} {:<22} {:>10}\n",
                "Item", "Cheapest", "Most expensive", "Savings"
            ));
            output.push_str(&"-".repeat(78));
            output.push('\n');
            for c in &self.comparisons {
                output.push_str(&format!(
                    "{:<20} {:<22} {:<22} {:>10} ({})\n",
                    truncate(&c.item, 20),
                    truncate(
                        &format!("{} {}", c.cheapest_store, c.cheapest_price.format_with_symbol(symbol)),
                        22
                    ),
                    truncate(
                        &format!(
                            "{} {}",
                            c.most_expensive_store,
                            c.most_expensive_price.format_with_symbol(symbol)
                        ),
                        22
                    ),
                    c.potential_savings.format_with_symbol(symbol),
                    format_percentage(c.savings_percentage)
                ));
            }
        }

        output.push_str("\nSuggestions\n");
        output.push_str(&"-".repeat(78));
        output.push('\n');
        if self.suggestions.is_empty() {
            output.push_str("Nothing stands out. Spending looks balanced.\n");
        } else {
            for suggestion in &self.suggestions {
                output.push_str(&format!("• {}\n", self.describe(suggestion)));
            }
        }

        output
    }

    /// Export the store comparison as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> GroceryResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Item",
            "Category",
            "Cheapest Store",
            "Cheapest Price",
            "Most Expensive Store",
            "Most Expensive Price",
            "Savings",
            "Savings Percentage",
        ])
        .map_err(csv_error)?;

        for c in &self.comparisons {
            csv.write_record([
                c.item.clone(),
                c.category.clone(),
                c.cheapest_store.clone(),
                csv_amount(c.cheapest_price),
                c.most_expensive_store.clone(),
                csv_amount(c.most_expensive_price),
                csv_amount(c.potential_savings),
                format!("{:.2}", c.savings_percentage),
            ])
            .map_err(csv_error)?;
        }

        csv.flush().map_err(csv_error)?;
        Ok(())
    }
}
