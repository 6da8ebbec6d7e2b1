//! JSON Export functionality
//!
//! Exports every item and budget to a single JSON document with schema
//! versioning, and reads such documents back for import.

use std::collections::BTreeSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GroceryError, GroceryResult};
use crate::models::{Budget, GroceryItem, Money};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All items, ascending id
    pub items: Vec<GroceryItem>,

    /// All budgets
    pub budgets: Vec<Budget>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub item_count: usize,
    pub purchased_count: usize,
    pub budget_count: usize,

    /// Sum of every item's total cost
    pub total_cost: Money,

    /// Earliest purchase date
    pub earliest_purchase: Option<String>,

    /// Latest purchase date
    pub latest_purchase: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> GroceryResult<Self> {
        let items = storage.items.get_all()?;
        let budgets = storage.budget.get_all()?;

        let purchase_dates = items.iter().filter_map(|i| i.purchase_date);
        let earliest_purchase = purchase_dates.clone().min().map(|d| d.to_string());
        let latest_purchase = purchase_dates.max().map(|d| d.to_string());

        let metadata = ExportMetadata {
            item_count: items.len(),
            purchased_count: items.iter().filter(|i| i.purchased).count(),
            budget_count: budgets.len(),
            total_cost: items.iter().map(GroceryItem::total_cost).sum(),
            earliest_purchase,
            latest_purchase,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            items,
            budgets,
            metadata,
        })
    }

    /// Validate the export structure
    ///
    /// Checks the schema version, every item's fields, id uniqueness and
    /// that each budget period appears once with a non-negative limit.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut ids = BTreeSet::new();
        for item in &self.items {
            item.validate()
                .map_err(|e| format!("Item {} ({}) is invalid: {}", item.id, item.name, e))?;
            if !ids.insert(item.id) {
                return Err(format!("Duplicate item id {}", item.id));
            }
        }

        let mut periods = BTreeSet::new();
        for budget in &self.budgets {
            if budget.limit_amount.is_negative() {
                return Err(format!("{} budget has a negative limit", budget.period));
            }
            if !periods.insert(budget.period) {
                return Err(format!("Duplicate {} budget", budget.period));
            }
        }

        Ok(())
    }
}

/// Export all data to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> GroceryResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| GroceryError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> GroceryResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| GroceryError::Import(e.to_string()))?;

    export.validate().map_err(GroceryError::Import)?;

    Ok(export)
}
