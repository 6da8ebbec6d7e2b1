//! Apply a validated export to storage

use crate::audit::{AuditEntry, EntityType};
use crate::error::GroceryResult;
use crate::export::json::FullExport;
use crate::storage::Storage;

/// What an import added or replaced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub items_added: usize,
    pub budgets_set: usize,
    /// Budgets that replaced an existing limit for the same period
    pub budgets_replaced: usize,
}

/// Merge an export into storage
///
/// Items are appended under freshly assigned ids, keeping their purchase
/// state and timestamps. Budgets replace any existing limit for the same
/// period. Every change is audited.
pub fn apply_import(storage: &Storage, export: FullExport) -> GroceryResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    let added = storage.items.insert_all(export.items)?;
    summary.items_added = added.len();

    let entries: Vec<AuditEntry> = added
        .iter()
        .map(|item| {
            AuditEntry::create(
                EntityType::Item,
                item.id.to_string(),
                Some(item.name.clone()),
                item,
            )
        })
        .collect();
    storage.audit().log_batch(&entries)?;

    for budget in export.budgets {
        let entity_id = budget.period.to_string().to_lowercase();
        match storage.budget.set(budget.clone())? {
            Some(previous) => {
                summary.budgets_replaced += 1;
                storage.log_update(EntityType::Budget, entity_id, None, &previous, &budget)?;
            }
            None => storage.log_create(EntityType::Budget, entity_id, None, &budget)?,
        }
        summary.budgets_set += 1;
    }

    Ok(summary)
}
