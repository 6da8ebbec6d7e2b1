//! Export module for grocery-cli
//!
//! Provides complete data export functionality in multiple formats:
//! - CSV: the item list (spreadsheet-compatible)
//! - JSON: machine-readable full export
//! - YAML: human-readable full export
//!
//! JSON and YAML exports can be imported again with `apply_import`.

pub mod csv;
pub mod json;
pub mod restore;
pub mod yaml;

pub use self::csv::{export_items_csv, write_items_csv};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use restore::{apply_import, ImportSummary};
pub use yaml::{export_full_yaml, import_from_yaml};
