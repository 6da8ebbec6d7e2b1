//! CLI command handler for importing an export file

use std::path::Path;

use crate::error::{GroceryError, GroceryResult};
use crate::export::{apply_import, import_from_json, import_from_yaml, FullExport};
use crate::storage::Storage;

/// Parse a JSON or YAML export, chosen by file extension
pub fn read_export_file(path: &Path) -> GroceryResult<FullExport> {
    if !path.exists() {
        return Err(GroceryError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| GroceryError::Import(format!("Failed to read file: {}", e)))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("yaml") | Some("yml") => import_from_yaml(&content),
        Some("json") | None => import_from_json(&content),
        Some(other) => Err(GroceryError::Import(format!(
            "Unsupported file type '.{}' (expected .json, .yaml or .yml)",
            other
        ))),
    }
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path, dry_run: bool) -> GroceryResult<()> {
    let export = read_export_file(file)?;

    println!("Import Preview for '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Exported at:  {}", export.exported_at.format("%Y-%m-%d %H:%M"));
    println!("  Items:        {}", export.items.len());
    println!("  Budgets:      {}", export.budgets.len());
    println!();

    if dry_run {
        println!("Dry run: nothing was imported.");
        return Ok(());
    }

    let summary = apply_import(storage, export)?;
    println!("Imported {} item(s) with new IDs.", summary.items_added);
    if summary.budgets_set > 0 {
        println!(
            "Set {} budget(s), {} replacing an existing limit.",
            summary.budgets_set, summary.budgets_replaced
        );
    }

    Ok(())
}
