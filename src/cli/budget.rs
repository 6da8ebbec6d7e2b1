//! Budget CLI commands
//!
//! Setting and clearing the weekly and monthly limits, and checking current
//! spending against them.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_alerts, format_budget_check, format_budget_checks, format_budget_list};
use crate::error::GroceryResult;
use crate::models::BudgetPeriod;
use crate::services::BudgetService;
use crate::storage::Storage;
use crate::validation::{parse_date, parse_price};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the spending limit for a period
    Set {
        /// weekly or monthly
        period: BudgetPeriod,
        /// Limit (e.g. "150" or "$150.00")
        amount: String,
    },

    /// Show configured limits
    #[command(alias = "list")]
    Show,

    /// Remove the limit for a period
    Clear {
        /// weekly or monthly
        period: BudgetPeriod,
    },

    /// Compare current spending with each budget
    Status {
        /// Only this period
        period: Option<BudgetPeriod>,
        /// Evaluate the windows containing this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Budgets near or over their limit, plus savings tips
    Alerts {
        /// Evaluate the windows containing this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
}

fn reference_date(date: Option<&str>) -> GroceryResult<NaiveDate> {
    match date {
        Some(d) => parse_date(d),
        None => Ok(Local::now().date_naive()),
    }
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> GroceryResult<()> {
    let service = BudgetService::new(storage, settings);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set { period, amount } => {
            let budget = service.set(period, parse_price(&amount)?)?;
            println!(
                "{} budget set to {}",
                budget.period,
                budget.limit_amount.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Show => {
            print!("{}", format_budget_list(&service.get_all()?, symbol));
        }

        BudgetCommands::Clear { period } => {
            let removed = service.clear(period)?;
            println!(
                "Cleared {} budget (was {})",
                removed.period,
                removed.limit_amount.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Status { period, date } => {
            let reference = reference_date(date.as_deref())?;
            match period {
                Some(period) => {
                    print!("{}", format_budget_check(&service.status_for(period, reference)?, symbol))
                }
                None => print!("{}", format_budget_checks(&service.status(reference)?, symbol)),
            }
        }

        BudgetCommands::Alerts { date } => {
            let reference = reference_date(date.as_deref())?;
            print!("{}", format_alerts(&service.alerts(reference)?));
        }
    }

    Ok(())
}
