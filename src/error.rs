//! Custom error types for grocery-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for grocery-cli operations
#[derive(Error, Debug)]
pub enum GroceryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Generic validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Item name was empty after trimming
    #[error("Item name cannot be empty")]
    EmptyName,

    /// A required text field was empty after trimming
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    /// A text field exceeded its maximum length
    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    /// Price text could not be parsed as a non-negative amount
    #[error("Invalid price format: '{input}'")]
    InvalidPriceFormat { input: String },

    /// Quantity text could not be parsed as a positive number
    #[error("Invalid quantity format: '{input}' (must be a number greater than zero)")]
    InvalidQuantityFormat { input: String },

    /// Date text was not a valid YYYY-MM-DD date
    #[error("Invalid date: '{input}' (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An aggregation that needs at least one item was given none
    #[error("Cannot compute {0} over an empty item set")]
    EmptyCollection(&'static str),

    /// Budget-related errors
    #[error("Budget error: {0}")]
    Budget(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GroceryError {
    /// Create a "not found" error for grocery items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was caused by invalid user input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::EmptyName
                | Self::EmptyField { .. }
                | Self::FieldTooLong { .. }
                | Self::InvalidPriceFormat { .. }
                | Self::InvalidQuantityFormat { .. }
                | Self::InvalidDate { .. }
        )
    }

    /// Name of the input field that caused a validation error, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyName => Some("name"),
            Self::EmptyField { field } | Self::FieldTooLong { field, .. } => Some(field),
            Self::InvalidPriceFormat { .. } => Some("price"),
            Self::InvalidQuantityFormat { .. } => Some("quantity"),
            Self::InvalidDate { .. } => Some("date"),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GroceryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GroceryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for grocery-cli operations
pub type GroceryResult<T> = Result<T, GroceryError>;
