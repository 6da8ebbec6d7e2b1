//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{GroceryError, GroceryResult};
use crate::export::{self, FullExport};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (items only)
    Csv,
    /// JSON format (everything)
    Json,
    /// YAML format (everything, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export the item list to CSV
    Items {
        /// Output file path
        output: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> GroceryResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => handle_export_all(storage, &output, format, pretty),
        ExportCommands::Items { output } => {
            let mut writer = create_writer(&output)?;
            export::export_items_csv(storage, &mut writer)?;
            println!(
                "Exported {} items to: {}",
                storage.items.count()?,
                output.display()
            );
            Ok(())
        }
        ExportCommands::Info => handle_export_info(storage),
    }
}

fn create_writer(path: &Path) -> GroceryResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        GroceryError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn handle_export_all(
    storage: &Storage,
    output: &Path,
    format: ExportFormat,
    pretty: bool,
) -> GroceryResult<()> {
    let mut writer = create_writer(output)?;

    match format {
        ExportFormat::Csv => {
            export::export_items_csv(storage, &mut writer)?;
            println!("Items exported to: {}", output.display());
            println!("Note: CSV holds items only. Use JSON or YAML to include budgets.");
        }
        ExportFormat::Json => {
            export::export_full_json(storage, &mut writer, pretty)?;
            println!("All data exported to: {}", output.display());
        }
        ExportFormat::Yaml => {
            export::export_full_yaml(storage, &mut writer)?;
            println!("All data exported to: {}", output.display());
        }
    }

    Ok(())
}

fn handle_export_info(storage: &Storage) -> GroceryResult<()> {
    let export = FullExport::from_storage(storage)?;

    println!("Export Information");
    println!("==================\n");

    println!("Schema Version: {}", export.schema_version);
    println!("App Version:    {}", export.app_version);
    println!();

    println!("Data Summary:");
    println!("  Items:       {}", export.metadata.item_count);
    println!("  Purchased:   {}", export.metadata.purchased_count);
    println!("  Budgets:     {}", export.metadata.budget_count);
    println!("  Total cost:  {}", export.metadata.total_cost);
    println!();

    if let (Some(earliest), Some(latest)) = (
        &export.metadata.earliest_purchase,
        &export.metadata.latest_purchase,
    ) {
        println!("Purchase Date Range: {} to {}", earliest, latest);
        println!();
    }

    println!("Available Export Formats:");
    println!("  csv  - CSV format (items)");
    println!("  json - JSON format (everything, machine-readable)");
    println!("  yaml - YAML format (everything, human-readable)");

    println!("\nExamples:");
    println!("  grocery export all groceries.json --format json --pretty");
    println!("  grocery export items items.csv");

    Ok(())
}
