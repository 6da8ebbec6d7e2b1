//! Savings insights: cheaper alternatives, store price comparison,
//! optimization suggestions and budget alerts

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BudgetPeriod, GroceryItem, Money};

use super::spending::spending_by_category;
use super::stats::average_price_per_unit;
use super::status::{BudgetCheck, BudgetStatus};

/// Items above this multiple of the average unit price are flagged
const EXPENSIVE_ITEM_FACTOR: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
/// Categories above this multiple of the average category spend are flagged
const HIGH_CATEGORY_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);
const MAX_EXPENSIVE_ITEMS: usize = 5;
const MAX_ALERT_SUGGESTIONS: usize = 3;

/// Cheapest other item in the same category as `target`
///
/// Ties on price go to the alphabetically first name, then the lower id.
pub fn cheapest_alternative<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
    target: &GroceryItem,
) -> Option<&'a GroceryItem> {
    items
        .into_iter()
        .filter(|i| i.id != target.id && i.category == target.category)
        .min_by(|a, b| {
            a.price_per_unit
                .cmp(&b.price_per_unit)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        })
}

/// Price spread for one product bought at several stores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreComparison {
    pub item: String,
    pub category: String,
    pub cheapest_store: String,
    pub cheapest_price: Money,
    pub most_expensive_store: String,
    pub most_expensive_price: Money,
    pub potential_savings: Money,
    pub savings_percentage: f64,
}

/// Compare unit prices of items sharing a name and category across stores
///
/// Only products seen at two or more distinct stores are reported, in name
/// order.
pub fn store_comparison<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> Vec<StoreComparison> {
    let mut products: BTreeMap<(&str, &str), Vec<&GroceryItem>> = BTreeMap::new();
    for item in items {
        products
            .entry((item.name.as_str(), item.category.as_str()))
            .or_default()
            .push(item);
    }

    products
        .into_iter()
        .filter_map(|((name, category), mut offers)| {
            let distinct_stores = offers
                .iter()
                .map(|o| o.store_name.as_str())
                .collect::<std::collections::BTreeSet<_>>()
                .len();
            if distinct_stores < 2 {
                return None;
            }

            offers.sort_by(|a, b| {
                a.price_per_unit
                    .cmp(&b.price_per_unit)
                    .then_with(|| a.store_name.cmp(&b.store_name))
            });
            let low = offers.first()?;
            let high = offers.last()?;
            let savings = high.price_per_unit - low.price_per_unit;

            Some(StoreComparison {
                item: name.to_string(),
                category: category.to_string(),
                cheapest_store: low.store_name.clone(),
                cheapest_price: low.price_per_unit,
                most_expensive_store: high.store_name.clone(),
                most_expensive_price: high.price_per_unit,
                potential_savings: savings,
                savings_percentage: savings.percentage_of(high.price_per_unit),
            })
        })
        .collect()
}

/// A spending reduction hint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    ExpensiveItem {
        item: String,
        price: Money,
        category: String,
        store: String,
    },
    HighSpendingCategory {
        category: String,
        total_spent: Money,
    },
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpensiveItem { item, price, store, .. } => write!(
                f,
                "{} costs {} per unit at {}; try a different store or look for sales",
                item, price, store
            ),
            Self::HighSpendingCategory {
                category,
                total_spent,
            } => write!(
                f,
                "{} spending is high ({}); consider cutting back or buying in bulk",
                category, total_spent
            ),
        }
    }
}

/// Flag items priced well above average and categories that dominate spending
///
/// Items: unit price above 1.5x the average unit price, highest first, at
/// most five. Categories: spend above 1.2x the average category spend,
/// highest first.
pub fn optimization_suggestions<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> Vec<Suggestion> {
    let items: Vec<&GroceryItem> = items.into_iter().collect();
    let mut suggestions = Vec::new();

    if let Ok(average) = average_price_per_unit(items.iter().copied()) {
        let cutoff = average.amount().saturating_mul(EXPENSIVE_ITEM_FACTOR);
        let mut expensive: Vec<&GroceryItem> = items
            .iter()
            .copied()
            .filter(|i| i.price_per_unit.amount() > cutoff)
            .collect();
        expensive.sort_by(|a, b| b.price_per_unit.cmp(&a.price_per_unit).then(a.id.cmp(&b.id)));

        suggestions.extend(expensive.into_iter().take(MAX_EXPENSIVE_ITEMS).map(|i| {
            Suggestion::ExpensiveItem {
                item: i.name.clone(),
                price: i.price_per_unit,
                category: i.category.clone(),
                store: i.store_name.clone(),
            }
        }));
    }

    let by_category = spending_by_category(items.iter().copied());
    let category_total: Money = by_category.values().copied().sum();
    if let Some(average) = category_total.divide(by_category.len()) {
        let cutoff = average.amount().saturating_mul(HIGH_CATEGORY_FACTOR);
        let mut heavy: Vec<(String, Money)> = by_category
            .into_iter()
            .filter(|(_, total)| total.amount() > cutoff)
            .collect();
        heavy.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        suggestions.extend(heavy.into_iter().map(|(category, total_spent)| {
            Suggestion::HighSpendingCategory {
                category,
                total_spent,
            }
        }));
    }

    suggestions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Exceeded,
    Warning,
    Suggestion,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exceeded => write!(f, "EXCEEDED"),
            Self::Warning => write!(f, "WARNING"),
            Self::Suggestion => write!(f, "TIP"),
        }
    }
}

/// A budget alert or tip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAlert {
    pub kind: AlertKind,
    /// Budget the alert is about; `None` for tips
    pub period: Option<BudgetPeriod>,
    pub message: String,
}

/// Alerts for budgets near or over their limit, plus a cheaper-alternatives tip
///
/// The tip lists up to three of `purchased` priced above
/// `expensive_threshold`, most expensive first.
pub fn budget_alerts<'a>(
    checks: &[BudgetCheck],
    purchased: impl IntoIterator<Item = &'a GroceryItem>,
    expensive_threshold: Money,
) -> Vec<BudgetAlert> {
    let mut alerts: Vec<BudgetAlert> = checks
        .iter()
        .filter_map(|check| match check.status {
            BudgetStatus::Over => Some(BudgetAlert {
                kind: AlertKind::Exceeded,
                period: Some(check.period),
                message: format!(
                    "{} budget exceeded by {}",
                    check.period,
                    check.spent - check.limit
                ),
            }),
            BudgetStatus::Near => Some(BudgetAlert {
                kind: AlertKind::Warning,
                period: Some(check.period),
                message: format!(
                    "{} budget {:.1}% used ({} left)",
                    check.period, check.used_percentage, check.remaining
                ),
            }),
            BudgetStatus::Under => None,
        })
        .collect();

    let mut pricey: Vec<&GroceryItem> = purchased
        .into_iter()
        .filter(|i| i.purchased && i.price_per_unit > expensive_threshold)
        .collect();
    pricey.sort_by(|a, b| b.price_per_unit.cmp(&a.price_per_unit).then(a.id.cmp(&b.id)));

    if !pricey.is_empty() {
        let listed: Vec<String> = pricey
            .iter()
            .take(MAX_ALERT_SUGGESTIONS)
            .map(|i| format!("{} ({}/{})", i.name, i.price_per_unit, i.unit))
            .collect();
        alerts.push(BudgetAlert {
            kind: AlertKind::Suggestion,
            period: None,
            message: format!("Consider cheaper alternatives for: {}", listed.join(", ")),
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::status::DEFAULT_NEAR_THRESHOLD;
    use crate::expense::test_support::{item, purchased};
    use crate::models::Budget;
    use chrono::{NaiveDate, Weekday};

    #[test]
    fn test_cheapest_alternative_tie_breaks_by_name() {
        let target = item(1, "Cheese", "Dairy", "s", 1, 500);
        let items = vec![
            target.clone(),
            item(2, "Milk", "Dairy", "s", 1, 200),
            item(3, "Butter", "Dairy", "s", 1, 200),
            item(4, "Bread", "Bakery", "s", 1, 100),
        ];
        let alt = cheapest_alternative(&items, &target).unwrap();
        assert_eq!(alt.name, "Butter");
    }

    #[test]
    fn test_cheapest_alternative_excludes_target() {
        let target = item(1, "Milk", "Dairy", "s", 1, 100);
        let items = vec![target.clone(), item(2, "Bread", "Bakery", "s", 1, 50)];
        assert!(cheapest_alternative(&items, &target).is_none());

        // The target itself may be the cheapest; an alternative is still returned
        let items = vec![target.clone(), item(3, "Cream", "Dairy", "s", 1, 400)];
        assert_eq!(cheapest_alternative(&items, &target).unwrap().name, "Cream");
    }

    #[test]
    fn test_store_comparison() {
        let items = vec![
            item(1, "Milk", "Dairy", "Aldi", 1, 100),
            item(2, "Milk", "Dairy", "Whole Foods", 1, 250),
            item(3, "Milk", "Dairy", "Lidl", 1, 120),
            item(4, "Bread", "Bakery", "Aldi", 1, 200),
            item(5, "Bread", "Bakery", "Aldi", 1, 220),
        ];
        let cmp = store_comparison(&items);

        assert_eq!(cmp.len(), 1);
        let milk = &cmp[0];
        assert_eq!(milk.cheapest_store, "Aldi");
        assert_eq!(milk.most_expensive_store, "Whole Foods");
        assert_eq!(milk.potential_savings, Money::from_cents(150));
        assert!((milk.savings_percentage - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_optimization_suggestions() {
        let items = vec![
            item(1, "Saffron", "Spices", "s", 1, 2000),
            item(2, "Rice", "Pantry", "s", 1, 200),
            item(3, "Beans", "Pantry", "s", 1, 100),
            item(4, "Salt", "Pantry", "s", 1, 100),
        ];
        let suggestions = optimization_suggestions(&items);

        // Average unit price 6.00, so only Saffron passes 9.00
        assert_eq!(
            suggestions[0],
            Suggestion::ExpensiveItem {
                item: "Saffron".into(),
                price: Money::from_cents(2000),
                category: "Spices".into(),
                store: "s".into(),
            }
        );
        // Category average 12.00, cutoff 14.40: Spices (20.00) only
        assert_eq!(suggestions.len(), 2);
        assert!(matches!(
            &suggestions[1],
            Suggestion::HighSpendingCategory { category, .. } if category == "Spices"
        ));
    }

    #[test]
    fn test_no_suggestions_for_empty_snapshot() {
        let items: Vec<GroceryItem> = Vec::new();
        assert!(optimization_suggestions(&items).is_empty());
    }

    #[test]
    fn test_budget_alerts() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let items = vec![
            purchased(item(1, "Steak", "Meat", "s", 1, 2500), reference),
            purchased(item(2, "Wine", "Drinks", "s", 1, 1500), reference),
            purchased(item(3, "Apples", "Fruit", "s", 1, 300), reference),
            item(4, "Caviar", "Fish", "s", 1, 9000),
        ];

        let weekly = Budget::new(BudgetPeriod::Weekly, Money::from_cents(4000));
        let monthly = Budget::new(BudgetPeriod::Monthly, Money::from_cents(4500));
        let checks: Vec<_> = [weekly, monthly]
            .iter()
            .map(|b| BudgetCheck::evaluate(b, &items[..3], reference, Weekday::Mon, DEFAULT_NEAR_THRESHOLD))
            .collect();

        let alerts = budget_alerts(&checks, &items, Money::from_cents(1000));
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].kind, AlertKind::Exceeded);
        assert_eq!(alerts[0].message, "Weekly budget exceeded by $3.00");
        assert_eq!(alerts[1].kind, AlertKind::Warning);
        assert_eq!(alerts[2].kind, AlertKind::Suggestion);
        assert!(alerts[2].message.contains("Steak"));
        assert!(!alerts[2].message.contains("Caviar"));
    }
}
