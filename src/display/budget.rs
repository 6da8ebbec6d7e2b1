//! Budget display formatting

use crate::expense::{AlertKind, BudgetAlert, BudgetCheck, BudgetStatus};
use crate::models::Budget;

use super::report::{format_bar, format_money_colored, format_percentage};

const BAR_WIDTH: usize = 20;

fn status_marker(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Under => "✓",
        BudgetStatus::Near => "!",
        BudgetStatus::Over => "✗",
    }
}

/// Configured limits, one per line
pub fn format_budget_list(budgets: &[Budget], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set. Use 'grocery budget set <weekly|monthly> <amount>'.\n".into();
    }

    budgets
        .iter()
        .map(|b| {
            format!(
                "{:<8} {:>12}  (set {})\n",
                b.period.to_string(),
                b.limit_amount.format_with_symbol(symbol),
                b.updated_at.format("%Y-%m-%d")
            )
        })
        .collect()
}

/// One budget check with a usage bar
pub fn format_budget_check(check: &BudgetCheck, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {} budget ({})\n",
        status_marker(check.status),
        check.period,
        check.window
    ));
    output.push_str(&format!(
        "  [{}] {}\n",
        format_bar(check.used_percentage, 100.0, BAR_WIDTH),
        format_percentage(check.used_percentage)
    ));
    output.push_str(&format!(
        "  Spent {} of {}, remaining {}\n",
        check.spent.format_with_symbol(symbol),
        check.limit.format_with_symbol(symbol),
        format_money_colored(check.remaining, symbol)
    ));
    output.push_str(&format!("  Status: {}\n", check.status));

    output
}

pub fn format_budget_checks(checks: &[BudgetCheck], symbol: &str) -> String {
    if checks.is_empty() {
        return "No budgets set.\n".into();
    }
    checks
        .iter()
        .map(|c| format_budget_check(c, symbol))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_alerts(alerts: &[BudgetAlert]) -> String {
    if alerts.is_empty() {
        return "No budget alerts.\n".into();
    }

    alerts
        .iter()
        .map(|alert| {
            let icon = match alert.kind {
                AlertKind::Exceeded => "✗",
                AlertKind::Warning => "!",
                AlertKind::Suggestion => "→",
            };
            format!("{} [{}] {}\n", icon, alert.kind, alert.message)
        })
        .collect()
}
