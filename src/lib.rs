//! grocery-cli - Terminal grocery list and expense tracker
//!
//! This library provides the core functionality for the `grocery` command:
//! a grocery list whose items carry quantity, unit price, category and
//! store, and the spending figures derived from it (per category, per
//! store, per week or month) checked against weekly and monthly budgets.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `validation`: Parsing and checking raw item input
//! - `models`: Core data models (items, budgets, money, quantities)
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `expense`: Spending aggregation, budget status and insights
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `reports`: Terminal and CSV reports
//! - `export`: JSON, YAML and CSV export and import
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use grocery::config::{paths::GroceryPaths, settings::Settings};
//! use grocery::services::ItemService;
//! use grocery::storage::Storage;
//!
//! let paths = GroceryPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let items = ItemService::new(&storage).list_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod expense;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{GroceryError, GroceryResult};
