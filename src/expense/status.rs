//! Budget threshold classification

use std::fmt;

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Budget, BudgetPeriod, GroceryItem, Money};

use super::spending::spending_in_window;
use super::window::DateWindow;

/// Share of the limit at which spending counts as near it (0.9)
pub const DEFAULT_NEAR_THRESHOLD: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Where current spending stands relative to a budget limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Under,
    Near,
    Over,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Under => write!(f, "Under budget"),
            Self::Near => write!(f, "Near limit"),
            Self::Over => write!(f, "Over budget"),
        }
    }
}

/// Classify spending against a budget with the default 90% threshold
pub fn budget_status(spend: Money, budget: &Budget) -> BudgetStatus {
    budget_status_with_threshold(spend, budget.limit_amount, DEFAULT_NEAR_THRESHOLD)
}

/// Classify spending against a limit
///
/// `Over` once spending reaches the limit, `Near` from `threshold x limit`
/// up to the limit, `Under` below that. A zero limit is always `Over`.
pub fn budget_status_with_threshold(spend: Money, limit: Money, threshold: Decimal) -> BudgetStatus {
    if spend >= limit {
        BudgetStatus::Over
    } else if spend.amount() >= limit.amount() * threshold {
        BudgetStatus::Near
    } else {
        BudgetStatus::Under
    }
}

/// A budget evaluated against the spending in its current window
#[derive(Debug, Clone, Serialize)]
pub struct BudgetCheck {
    pub period: BudgetPeriod,
    #[serde(skip)]
    pub window: DateWindow,
    pub limit: Money,
    pub spent: Money,
    pub remaining: Money,
    pub used_percentage: f64,
    pub status: BudgetStatus,
}

impl BudgetCheck {
    /// Evaluate `budget` for the window containing `reference`
    pub fn evaluate<'a>(
        budget: &Budget,
        items: impl IntoIterator<Item = &'a GroceryItem>,
        reference: NaiveDate,
        week_start: Weekday,
        threshold: Decimal,
    ) -> Self {
        let window = match budget.period {
            BudgetPeriod::Weekly => DateWindow::week_containing(reference, week_start),
            BudgetPeriod::Monthly => DateWindow::month_containing(reference),
        };
        let spent = spending_in_window(items, window.start, window.end);

        Self {
            period: budget.period,
            window,
            limit: budget.limit_amount,
            spent,
            remaining: budget.remaining(spent),
            used_percentage: budget.used_percentage(spent),
            status: budget_status_with_threshold(spent, budget.limit_amount, threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::test_support::{item, purchased};

    fn dollars(n: i64) -> Money {
        Money::from_cents(n * 100)
    }

    fn monthly(limit: Money) -> Budget {
        Budget::new(BudgetPeriod::Monthly, limit)
    }

    #[test]
    fn test_status_boundaries() {
        let budget = monthly(dollars(100));
        assert_eq!(budget_status(dollars(90), &budget), BudgetStatus::Near);
        assert_eq!(budget_status(dollars(100), &budget), BudgetStatus::Over);
        assert_eq!(budget_status(dollars(50), &budget), BudgetStatus::Under);
        assert_eq!(
            budget_status(Money::from_cents(8999), &budget),
            BudgetStatus::Under
        );
        assert_eq!(budget_status(dollars(120), &budget), BudgetStatus::Over);
    }

    #[test]
    fn test_zero_limit_is_over() {
        assert_eq!(
            budget_status(Money::zero(), &monthly(Money::zero())),
            BudgetStatus::Over
        );
    }

    #[test]
    fn test_custom_threshold() {
        let eighty = Decimal::new(8, 1);
        assert_eq!(
            budget_status_with_threshold(dollars(80), dollars(100), eighty),
            BudgetStatus::Near
        );
        assert_eq!(budget_status(dollars(80), &monthly(dollars(100))), BudgetStatus::Under);
    }

    #[test]
    fn test_budget_check_uses_period_window() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let items = vec![
            purchased(item(1, "a", "c", "s", 1, 4000), reference),
            purchased(
                item(2, "b", "c", "s", 1, 5000),
                NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            ),
        ];

        let weekly = Budget::new(BudgetPeriod::Weekly, dollars(50));
        let check = BudgetCheck::evaluate(&weekly, &items, reference, Weekday::Mon, DEFAULT_NEAR_THRESHOLD);
        assert_eq!(check.spent, dollars(40));
        assert_eq!(check.remaining, dollars(10));
        assert_eq!(check.status, BudgetStatus::Under);

        let monthly = Budget::new(BudgetPeriod::Monthly, dollars(90));
        let check = BudgetCheck::evaluate(&monthly, &items, reference, Weekday::Mon, DEFAULT_NEAR_THRESHOLD);
        assert_eq!(check.spent, dollars(90));
        assert_eq!(check.status, BudgetStatus::Over);
        assert!(check.remaining.is_zero());
    }
}
