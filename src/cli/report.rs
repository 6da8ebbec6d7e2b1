//! CLI commands for reports
//!
//! Each report prints to the terminal, or is written as CSV with
//! `--output <file>` or `--save` (into the reports directory).

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::error::{GroceryError, GroceryResult};
use crate::expense::DateWindow;
use crate::reports::{
    BudgetOverviewReport, PriceDistributionReport, SavingsReport, SpendingReport, TrendReport,
};
use crate::storage::Storage;
use crate::validation::parse_date;

/// Where a report goes instead of the terminal
#[derive(Args, Debug)]
pub struct ReportOutput {
    /// Export to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export to a dated CSV file in the reports directory
    #[arg(long, conflicts_with = "output")]
    save: bool,
}

impl ReportOutput {
    fn is_export(&self) -> bool {
        self.output.is_some() || self.save
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category and store
    Spending {
        /// Calendar month (YYYY-MM)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        month: Option<String>,

        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<String>,

        /// Include items not bought yet
        #[arg(long)]
        planned: bool,

        /// Show only the top N categories
        #[arg(long)]
        top: Option<usize>,

        #[command(flatten)]
        out: ReportOutput,
    },

    /// Budget status, monthly summary and alerts
    Budget {
        /// Evaluate the windows containing this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        out: ReportOutput,
    },

    /// Daily spending for recent days
    Trend {
        /// Number of days (defaults to the configured trend length)
        #[arg(long)]
        days: Option<u32>,

        /// Last day of the trend (YYYY-MM-DD), defaults to today
        #[arg(long)]
        end: Option<String>,

        #[command(flatten)]
        out: ReportOutput,
    },

    /// How unit prices are spread across price ranges
    #[command(alias = "distribution")]
    Prices {
        #[command(flatten)]
        out: ReportOutput,
    },

    /// Store price comparison and savings suggestions
    Savings {
        #[command(flatten)]
        out: ReportOutput,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> GroceryResult<()> {
    let today = Local::now().date_naive();

    match cmd {
        ReportCommands::Spending {
            month,
            from,
            to,
            planned,
            top,
            out,
        } => {
            let window = spending_window(month, from, to, today)?;
            let mut report = SpendingReport::generate(storage, settings, window, planned)?;
            if let Some(n) = top {
                report.categories = report.top_categories(n).to_vec();
            }
            emit(storage, &out, "spending", today, report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }

        ReportCommands::Budget { date, out } => {
            let reference = date.as_deref().map(parse_date).transpose()?.unwrap_or(today);
            let report = BudgetOverviewReport::generate(storage, settings, reference)?;
            emit(storage, &out, "budget", today, report.format_terminal(), |w| {
                report.export_csv(w)
            })?;
            if report.has_overspending() && out.is_export() {
                eprintln!("Warning: at least one budget is exceeded.");
            }
            Ok(())
        }

        ReportCommands::Trend { days, end, out } => {
            let last_day = end.as_deref().map(parse_date).transpose()?.unwrap_or(today);
            let days = days.unwrap_or(settings.trend_days);
            let report = TrendReport::generate(storage, settings, last_day, days)?;
            emit(storage, &out, "trend", today, report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }

        ReportCommands::Prices { out } => {
            let report = PriceDistributionReport::generate(storage, settings)?;
            emit(storage, &out, "prices", today, report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }

        ReportCommands::Savings { out } => {
            let report = SavingsReport::generate(storage, settings)?;
            emit(storage, &out, "savings", today, report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }
    }
}

/// Resolve the spending window from `--month` or `--from/--to`
///
/// A missing `--from` starts at the first of the `--to` month.
fn spending_window(
    month: Option<String>,
    from: Option<String>,
    to: Option<String>,
    today: NaiveDate,
) -> GroceryResult<Option<DateWindow>> {
    if let Some(month) = month {
        let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
            .map_err(|_| {
                GroceryError::Validation(format!(
                    "Invalid month '{}'. Use YYYY-MM (e.g., 2025-01)",
                    month
                ))
            })?;
        return Ok(Some(DateWindow::month_containing(first)));
    }

    match (from, to) {
        (None, None) => Ok(None),
        (from, to) => {
            let to = to.as_deref().map(parse_date).transpose()?.unwrap_or(today);
            let from = match from {
                Some(f) => parse_date(&f)?,
                None => to.with_day(1).unwrap_or(to),
            };
            if from > to {
                return Err(GroceryError::Validation(format!(
                    "Start date {} is after end date {}",
                    from, to
                )));
            }
            let end = to.succ_opt().unwrap_or(NaiveDate::MAX);
            Ok(Some(DateWindow::new(from, end)))
        }
    }
}

/// Print the report, or write it as CSV when an output was requested
fn emit(
    storage: &Storage,
    out: &ReportOutput,
    name: &str,
    today: NaiveDate,
    terminal: String,
    export: impl FnOnce(&mut BufWriter<File>) -> GroceryResult<()>,
) -> GroceryResult<()> {
    let path = match (&out.output, out.save) {
        (Some(path), _) => path.clone(),
        (None, true) => storage
            .paths()
            .reports_dir()
            .join(format!("{}-{}.csv", name, today)),
        (None, false) => {
            print!("{}", terminal);
            return Ok(());
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            GroceryError::Export(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    let file = File::create(&path).map_err(|e| {
        GroceryError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export(&mut writer)?;

    println!("Report exported to: {}", path.display());
    Ok(())
}
