//! Reports module for grocery-cli
//!
//! Each report is generated from a storage snapshot, rendered for the
//! terminal with `format_terminal` and written as a CSV series with
//! `export_csv`.

pub mod budget_overview;
pub mod prices;
pub mod savings;
pub mod spending;
pub mod trend;

pub use budget_overview::BudgetOverviewReport;
pub use prices::PriceDistributionReport;
pub use savings::SavingsReport;
pub use spending::SpendingReport;
pub use trend::TrendReport;

use crate::error::GroceryError;
use crate::models::Money;

/// Plain two-decimal amount for CSV cells
pub(crate) fn csv_amount(amount: Money) -> String {
    format!("{:.2}", amount.rounded().amount())
}

pub(crate) fn csv_error(e: impl std::fmt::Display) -> GroceryError {
    GroceryError::Export(e.to_string())
}
