//! Service layer for grocery-cli
//!
//! Business logic on top of the storage layer: validation of mutations,
//! audit logging and the queries the CLI and reports need.

pub mod budget;
pub mod item;

pub use budget::BudgetService;
pub use item::{ItemFilter, ItemService, ItemSort, SortKey};
