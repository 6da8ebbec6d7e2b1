//! Catalog CLI commands: suggested categories, units and stores

use clap::Subcommand;

use crate::error::GroceryResult;
use crate::models::catalog::{COMMON_CATEGORIES, COMMON_STORES, COMMON_UNITS};
use crate::services::ItemService;
use crate::storage::Storage;

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Suggested categories, plus any others in use
    Categories,
    /// Suggested units of measure
    Units,
    /// Suggested stores, plus any others in use
    Stores,
}

/// Suggestions first, then values already used that are not suggestions
fn print_with_in_use(suggested: &[&str], in_use: Vec<String>) {
    for value in suggested {
        println!("  {}", value);
    }

    let extra: Vec<String> = in_use
        .into_iter()
        .filter(|v| !suggested.iter().any(|s| s.eq_ignore_ascii_case(v)))
        .collect();
    if !extra.is_empty() {
        println!("\nAlso in use:");
        for value in extra {
            println!("  {}", value);
        }
    }
}

pub fn handle_catalog_command(storage: &Storage, cmd: CatalogCommands) -> GroceryResult<()> {
    let items = ItemService::new(storage);

    match cmd {
        CatalogCommands::Categories => {
            println!("Categories:");
            print_with_in_use(COMMON_CATEGORIES, items.categories()?);
        }
        CatalogCommands::Units => {
            println!("Units:");
            println!("  {}", COMMON_UNITS.join(", "));
        }
        CatalogCommands::Stores => {
            println!("Stores:");
            print_with_in_use(COMMON_STORES, items.stores()?);
        }
    }

    Ok(())
}
