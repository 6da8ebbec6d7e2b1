//! Core data models for grocery-cli
//!
//! This module contains the data structures of the grocery domain: items,
//! budgets, and the value types they are built from.

pub mod budget;
pub mod catalog;
pub mod ids;
pub mod item;
pub mod money;
pub mod quantity;

pub use budget::{Budget, BudgetPeriod};
pub use ids::ItemId;
pub use item::{GroceryItem, ItemPatch, NewItem};
pub use money::Money;
pub use quantity::Quantity;
