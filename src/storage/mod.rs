//! Storage layer for grocery-cli
//!
//! JSON files with atomic writes, one repository per file, plus the audit
//! log. `Storage` is owned by the binary and lent to services.

pub mod budget;
pub mod file_io;
pub mod init;
pub mod items;

pub use budget::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use items::ItemRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::GroceryPaths;
use crate::error::GroceryResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: GroceryPaths,
    pub items: ItemRepository,
    pub budget: BudgetRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage handle, making sure the directories exist
    pub fn new(paths: GroceryPaths) -> GroceryResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            items: ItemRepository::new(paths.items_file()),
            budget: BudgetRepository::new(paths.budget_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &GroceryPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> GroceryResult<()> {
        self.items.load()?;
        self.budget.load()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> GroceryResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update, with a summary of the changed fields
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> GroceryResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a deleted entity in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> GroceryResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        storage.load_all().unwrap();
        assert_eq!(storage.items.count().unwrap(), 0);
    }

    #[test]
    fn test_log_update_includes_diff() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .log_update(
                EntityType::Item,
                "#1",
                Some("Milk".into()),
                &json!({"quantity": "1"}),
                &json!({"quantity": "2"}),
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(
            entries[0].diff_summary.as_deref(),
            Some("quantity: \"1\" -> \"2\"")
        );
    }
}
