//! Display formatting for terminal output
//!
//! Provides utilities for formatting items, budgets and report elements
//! for terminal display.

pub mod budget;
pub mod item;
pub mod report;

pub use budget::{format_alerts, format_budget_check, format_budget_checks, format_budget_list};
pub use item::{format_item_details, format_item_short, format_item_table};
