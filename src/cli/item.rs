//! Item CLI commands
//!
//! Adding, editing and listing grocery items, purchase tracking and quick
//! statistics.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_item_details, format_item_short, format_item_table};
use crate::error::GroceryResult;
use crate::models::catalog::is_common_category;
use crate::models::ItemId;
use crate::services::{ItemFilter, ItemService, ItemSort, SortKey};
use crate::storage::Storage;
use crate::validation::{parse_date, parse_price, ItemInput, ItemPatchInput};

/// Item subcommands
#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Add an item to the list
    Add {
        /// Item name
        name: String,
        /// Category (see 'grocery catalog categories')
        #[arg(short, long)]
        category: String,
        /// Price per unit (e.g. "2.50" or "$2.50")
        #[arg(short, long)]
        price: String,
        /// Store the item is bought at
        #[arg(short, long)]
        store: String,
        /// Quantity
        #[arg(short, long, default_value = "1")]
        quantity: String,
        /// Unit of measure
        #[arg(short, long, default_value = "piece")]
        unit: String,
        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Record the item as already bought (today unless --date is given)
        #[arg(long)]
        bought: bool,
        /// Purchase date (YYYY-MM-DD); implies --bought
        #[arg(long)]
        date: Option<String>,
    },

    /// List items
    #[command(alias = "ls")]
    List {
        /// Only items in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only items from this store
        #[arg(short, long)]
        store: Option<String>,
        /// Only items whose name contains this text
        #[arg(short, long)]
        name: Option<String>,
        /// Minimum price per unit
        #[arg(long)]
        min_price: Option<String>,
        /// Maximum price per unit
        #[arg(long)]
        max_price: Option<String>,
        /// Only bought items
        #[arg(long, conflicts_with = "pending")]
        purchased: bool,
        /// Only items not bought yet
        #[arg(long)]
        pending: bool,
        /// Sort by name, category, store, price or total
        #[arg(long)]
        sort: Option<SortKey>,
        /// Reverse the sort order
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Show at most this many items
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show every field of one item
    Show {
        /// Item ID (e.g. "3" or "#3")
        id: ItemId,
    },

    /// Change fields of an item
    Edit {
        /// Item ID
        id: ItemId,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        quantity: Option<String>,
        #[arg(short, long)]
        unit: Option<String>,
        #[arg(short, long)]
        price: Option<String>,
        #[arg(short, long)]
        store: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Remove the notes
        #[arg(long, conflicts_with = "notes")]
        clear_notes: bool,
    },

    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Item ID
        id: ItemId,
    },

    /// Mark an item as bought
    Buy {
        /// Item ID
        id: ItemId,
        /// Purchase date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Mark an item as not bought
    Unbuy {
        /// Item ID
        id: ItemId,
    },

    /// Search names, categories and stores
    Search {
        /// Text to look for
        query: String,
    },

    /// Items priced above the expensive threshold
    Expensive {
        /// Override the configured threshold
        #[arg(short, long)]
        threshold: Option<String>,
    },

    /// Items priced at or below the budget-friendly threshold
    Cheap {
        /// Override the configured threshold
        #[arg(short, long)]
        threshold: Option<String>,
    },

    /// Cheapest other item in the same category
    #[command(alias = "alt")]
    Alternative {
        /// Item ID
        id: ItemId,
    },

    /// Counts and totals for the whole list
    Stats,
}

/// Handle an item command
pub fn handle_item_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ItemCommands,
) -> GroceryResult<()> {
    let service = ItemService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ItemCommands::Add {
            name,
            category,
            price,
            store,
            quantity,
            unit,
            notes,
            bought,
            date,
        } => {
            let purchased_on = match (date, bought) {
                (Some(date), _) => Some(date),
                (None, true) => Some(chrono::Local::now().date_naive().to_string()),
                (None, false) => None,
            };
            let item = service.add(&ItemInput {
                name,
                category,
                quantity,
                unit,
                price,
                store,
                notes,
                purchased_on,
            })?;
            println!("Added {}", format_item_short(&item, symbol));
            if !is_common_category(&item.category) {
                println!(
                    "Note: '{}' is not a suggested category (see 'grocery catalog categories')",
                    item.category
                );
            }
        }

        ItemCommands::List {
            category,
            store,
            name,
            min_price,
            max_price,
            purchased,
            pending,
            sort,
            desc,
            limit,
        } => {
            let mut filter = ItemFilter::new();
            filter.category = category;
            filter.store = store;
            filter.name_contains = name;
            filter.min_price = min_price.as_deref().map(parse_price).transpose()?;
            filter.max_price = max_price.as_deref().map(parse_price).transpose()?;
            filter.limit = limit;
            if purchased {
                filter.purchased = Some(true);
            } else if pending {
                filter.purchased = Some(false);
            }

            let sort = sort.map(|key| ItemSort {
                key,
                descending: desc,
            });
            let items = service.list(&filter, sort)?;

            print!("{}", format_item_table(&items, symbol));
            if !items.is_empty() {
                let total = crate::expense::total_spent(&items);
                println!(
                    "{} item(s), total {}",
                    items.len(),
                    total.format_with_symbol(symbol)
                );
            }
        }

        ItemCommands::Show { id } => {
            let item = service.get(id)?;
            print!("{}", format_item_details(&item, symbol, &settings.date_format));
        }

        ItemCommands::Edit {
            id,
            name,
            category,
            quantity,
            unit,
            price,
            store,
            notes,
            clear_notes,
        } => {
            let patch = ItemPatchInput {
                name,
                category,
                quantity,
                unit,
                price,
                store,
                notes,
                clear_notes,
            }
            .validate()?;

            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }
            let item = service.update(id, patch)?;
            println!("Updated {}", format_item_short(&item, symbol));
        }

        ItemCommands::Delete { id } => {
            let item = service.delete(id)?;
            println!("Deleted {} {}", item.id, item.name);
        }

        ItemCommands::Buy { id, date } => {
            let date = date.as_deref().map(parse_date).transpose()?;
            let item = service.mark_purchased(id, date)?;
            if let Some(on) = item.purchase_date {
                println!(
                    "Bought {} on {}",
                    format_item_short(&item, symbol),
                    on.format(&settings.date_format)
                );
            }
        }

        ItemCommands::Unbuy { id } => {
            let item = service.mark_unpurchased(id)?;
            println!("Marked {} {} as not bought", item.id, item.name);
        }

        ItemCommands::Search { query } => {
            let items = service.search(&query)?;
            print!("{}", format_item_table(&items, symbol));
        }

        ItemCommands::Expensive { threshold } => {
            let threshold = match threshold {
                Some(t) => parse_price(&t)?,
                None => settings.expensive_threshold,
            };
            println!(
                "Items above {} per unit:",
                threshold.format_with_symbol(symbol)
            );
            print!("{}", format_item_table(&service.expensive(threshold)?, symbol));
        }

        ItemCommands::Cheap { threshold } => {
            let threshold = match threshold {
                Some(t) => parse_price(&t)?,
                None => settings.budget_friendly_threshold,
            };
            println!(
                "Items at or below {} per unit:",
                threshold.format_with_symbol(symbol)
            );
            print!(
                "{}",
                format_item_table(&service.budget_friendly(threshold)?, symbol)
            );
        }

        ItemCommands::Alternative { id } => {
            let target = service.get(id)?;
            match service.cheapest_alternative(id)? {
                Some(alt) => {
                    println!("Cheapest alternative to {} in {}:", target.name, target.category);
                    println!("  {}", format_item_short(&alt, symbol));
                    if alt.price_per_unit < target.price_per_unit {
                        println!(
                            "  Saves {} per unit",
                            (target.price_per_unit - alt.price_per_unit).format_with_symbol(symbol)
                        );
                    }
                }
                None => println!("No other items in {}.", target.category),
            }
        }

        ItemCommands::Stats => {
            let stats = service.statistics()?;
            println!("Grocery List Statistics");
            println!("{}", "=".repeat(40));
            println!("Items:        {}", stats.total_items);
            println!(
                "  Bought:     {:<5} {}",
                stats.purchased_items,
                stats.purchased_cost.format_with_symbol(symbol)
            );
            println!(
                "  To buy:     {:<5} {}",
                stats.unpurchased_items,
                stats.unpurchased_cost.format_with_symbol(symbol)
            );
            println!("Total cost:   {}", stats.total_cost.format_with_symbol(symbol));
            println!("Categories:   {}", stats.categories);
            println!("Stores:       {}", stats.stores);
        }
    }

    Ok(())
}
