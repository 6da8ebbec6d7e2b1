//! YAML Export functionality
//!
//! Exports all data to YAML for a human-readable backup.

use std::io::Write;

use crate::error::{GroceryError, GroceryResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export all data to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> GroceryResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# grocery-cli data export\n# Generated: {}\n# App Version: {}\n#\n# Restore with: grocery import <file>\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| GroceryError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| GroceryError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> GroceryResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| GroceryError::Import(e.to_string()))?;

    export.validate().map_err(GroceryError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::GroceryPaths;
    use crate::services::ItemService;
    use crate::validation::ItemInput;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        ItemService::new(&storage)
            .add(&ItemInput {
                name: "Basmati Rice".into(),
                category: "International".into(),
                quantity: "5".into(),
                unit: "kg".into(),
                price: "₹120".into(),
                store: "Local Market".into(),
                notes: None,
                purchased_on: None,
            })
            .unwrap();

        let mut yaml_output = Vec::new();
        export_full_yaml(&storage, &mut yaml_output).unwrap();
        let yaml_string = String::from_utf8(yaml_output).unwrap();

        assert!(yaml_string.starts_with("# grocery-cli data export"));
        assert!(yaml_string.contains("Basmati Rice"));

        // Comment lines are valid YAML, so the file parses as written
        let imported = import_from_yaml(&yaml_string).unwrap();
        assert_eq!(imported.items.len(), 1);
        assert_eq!(imported.items[0].unit, "kg");
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            import_from_yaml("items: [1, 2"),
            Err(GroceryError::Import(_))
        ));
    }
}
