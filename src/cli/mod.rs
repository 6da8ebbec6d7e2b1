//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod catalog;
pub mod export;
pub mod history;
pub mod import;
pub mod item;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use catalog::{handle_catalog_command, CatalogCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::handle_history_command;
pub use import::handle_import_command;
pub use item::{handle_item_command, ItemCommands};
pub use report::{handle_report_command, ReportCommands};
