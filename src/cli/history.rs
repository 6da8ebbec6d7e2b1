//! CLI command handler for the change history

use crate::audit::{AuditEntry, EntityType};
use crate::error::GroceryResult;
use crate::models::{BudgetPeriod, ItemId};
use crate::storage::Storage;

/// Show the most recent audit entries, newest last
pub fn handle_history_command(
    storage: &Storage,
    limit: usize,
    item: Option<ItemId>,
    budget: Option<BudgetPeriod>,
) -> GroceryResult<()> {
    let audit = storage.audit();
    if !audit.exists() {
        println!("No history recorded.");
        return Ok(());
    }

    let entries: Vec<AuditEntry> = match (item, budget) {
        (Some(id), _) => audit.read_for(EntityType::Item, &id.to_string())?,
        (None, Some(period)) => {
            audit.read_for(EntityType::Budget, &period.to_string().to_lowercase())?
        }
        (None, None) => audit.read_recent(limit)?,
    };

    if entries.is_empty() {
        println!("No history recorded.");
        return Ok(());
    }

    let skip = entries.len().saturating_sub(limit);
    for entry in entries.iter().skip(skip) {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
