use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use grocery::cli::{
    handle_budget_command, handle_catalog_command, handle_export_command, handle_history_command,
    handle_import_command, handle_item_command, handle_report_command,
};
use grocery::config::paths::DATA_DIR_ENV;
use grocery::config::{paths::GroceryPaths, settings::Settings};
use grocery::models::{BudgetPeriod, ItemId};
use grocery::storage::Storage;

#[derive(Parser)]
#[command(
    name = "grocery",
    version,
    about = "Terminal grocery list and expense tracker",
    long_about = "grocery keeps your shopping list with quantities, prices and stores, \
                  tracks what you have bought and compares your spending with weekly \
                  and monthly budgets."
)]
struct Cli {
    /// Data directory (defaults to ~/.config/grocery-cli)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Grocery item commands
    #[command(subcommand)]
    Item(grocery::cli::ItemCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(grocery::cli::BudgetCommands),

    /// Spending, budget, trend, price and savings reports
    #[command(subcommand)]
    Report(grocery::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(grocery::cli::ExportCommands),

    /// Import a JSON or YAML export (items get new IDs)
    Import {
        /// Path to the export file
        file: PathBuf,
        /// Show what would be imported without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the change history
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only changes to this item
        #[arg(long, conflicts_with = "budget")]
        item: Option<ItemId>,
        /// Only changes to this budget
        #[arg(long)]
        budget: Option<BudgetPeriod>,
    },

    /// Suggested categories, units and stores
    #[command(subcommand)]
    Catalog(grocery::cli::catalog::CatalogCommands),

    /// Initialize the data directory
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Change a setting (e.g. currency_symbol, week_start, trend_days)
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => GroceryPaths::with_base_dir(dir),
        None => GroceryPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Item(cmd)) => handle_item_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Import { file, dry_run }) => {
            handle_import_command(&storage, &file, dry_run)?
        }
        Some(Commands::History {
            limit,
            item,
            budget,
        }) => handle_history_command(&storage, limit, item, budget)?,
        Some(Commands::Catalog(cmd)) => handle_catalog_command(&storage, cmd)?,
        Some(Commands::Init) => {
            println!("Initializing grocery-cli at: {}", paths.base_dir().display());
            if grocery::storage::initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized; existing data was left as is.");
            }
            println!();
            println!("Add your first item with:");
            println!("  grocery item add Milk --category \"Dairy & Eggs\" --price 1.49 --store Aldi");
        }
        Some(Commands::Config { action: None }) => {
            println!("grocery-cli Configuration");
            println!("=========================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Reports directory: {}", paths.reports_dir().display());
            println!("Audit log:         {}", storage.audit().path().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol:           {}", settings.currency_symbol);
            println!("  date_format:               {}", settings.date_format);
            println!("  week_start:                {:?}", settings.week_start);
            println!("  near_threshold_percent:    {}", settings.near_threshold_percent);
            println!("  expensive_threshold:       {}", settings.expensive_threshold);
            println!(
                "  budget_friendly_threshold: {}",
                settings.budget_friendly_threshold
            );
            println!("  trend_days:                {}", settings.trend_days);
            let edges: Vec<String> = settings
                .price_bucket_edges
                .iter()
                .map(|e| e.amount().to_string())
                .collect();
            println!("  price_bucket_edges:        {}", edges.join(", "));
        }
        Some(Commands::Config {
            action: Some(ConfigAction::Set { key, value }),
        }) => {
            settings.set(&key, &value)?;
            settings.save(&paths)?;
            println!("Set {} = {}", key, value);
        }
        None => {
            println!("grocery - Terminal grocery list and expense tracker");
            println!();
            println!("Run 'grocery --help' for usage information.");
            if grocery::storage::needs_initialization(&paths) {
                println!("Run 'grocery init' to set up your data directory.");
            }
        }
    }

    Ok(())
}
