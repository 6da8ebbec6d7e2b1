//! Summary statistics over an item snapshot
//!
//! Single-value statistics fail with `EmptyCollection` on an empty snapshot
//! rather than inventing a zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{GroceryError, GroceryResult};
use crate::models::{Budget, GroceryItem, Money};

use super::spending::total_spent;
use super::window::DateWindow;

/// Mean price per unit
pub fn average_price_per_unit<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> GroceryResult<Money> {
    mean(items.into_iter().map(|i| i.price_per_unit), "average price per unit")
}

/// Mean total cost per item
pub fn average_total_cost<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> GroceryResult<Money> {
    mean(items.into_iter().map(GroceryItem::total_cost), "average total cost")
}

fn mean(values: impl Iterator<Item = Money>, what: &'static str) -> GroceryResult<Money> {
    let (sum, count) = values.fold((Money::zero(), 0usize), |(sum, n), v| (sum + v, n + 1));
    sum.divide(count).ok_or(GroceryError::EmptyCollection(what))
}

/// Median price per unit; the mean of the two middle prices for even counts
pub fn median_price_per_unit<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> GroceryResult<Money> {
    let mut prices: Vec<Money> = items.into_iter().map(|i| i.price_per_unit).collect();
    if prices.is_empty() {
        return Err(GroceryError::EmptyCollection("median price per unit"));
    }
    prices.sort();

    let mid = prices.len() / 2;
    if prices.len() % 2 == 1 {
        Ok(prices[mid])
    } else {
        Ok(Money::new(
            prices[mid - 1].amount().saturating_add(prices[mid].amount()) / Decimal::TWO,
        ))
    }
}

/// Item with the highest total cost (lowest id on ties)
pub fn most_expensive<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> GroceryResult<&'a GroceryItem> {
    items
        .into_iter()
        .max_by(|a, b| a.total_cost().cmp(&b.total_cost()).then(b.id.cmp(&a.id)))
        .ok_or(GroceryError::EmptyCollection("most expensive item"))
}

/// Item with the lowest total cost (lowest id on ties)
pub fn cheapest<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> GroceryResult<&'a GroceryItem> {
    items
        .into_iter()
        .min_by(|a, b| a.total_cost().cmp(&b.total_cost()).then(a.id.cmp(&b.id)))
        .ok_or(GroceryError::EmptyCollection("cheapest item"))
}

/// Spending overview for one calendar month
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseSummary {
    #[serde(skip)]
    pub window: DateWindow,
    pub total_spent: Money,
    pub item_count: usize,
    pub average_item_cost: Option<Money>,
    /// Name and total cost
    pub most_expensive: Option<(String, Money)>,
    pub cheapest: Option<(String, Money)>,
    pub budget_limit: Option<Money>,
    pub budget_remaining: Option<Money>,
    pub budget_used_percentage: Option<f64>,
}

impl ExpenseSummary {
    /// Summarise the items whose relevant date falls in the month of `reference`
    pub fn for_month<'a>(
        items: impl IntoIterator<Item = &'a GroceryItem>,
        reference: NaiveDate,
        monthly_budget: Option<&Budget>,
    ) -> Self {
        let window = DateWindow::month_containing(reference);
        let in_month: Vec<&GroceryItem> = items
            .into_iter()
            .filter(|i| window.contains(i.relevant_date()))
            .collect();

        let total = total_spent(in_month.iter().copied());
        let named = |item: &GroceryItem| (item.name.clone(), item.total_cost());

        Self {
            window,
            total_spent: total,
            item_count: in_month.len(),
            average_item_cost: average_total_cost(in_month.iter().copied()).ok(),
            most_expensive: most_expensive(in_month.iter().copied()).ok().map(named),
            cheapest: cheapest(in_month.iter().copied()).ok().map(named),
            budget_limit: monthly_budget.map(|b| b.limit_amount),
            budget_remaining: monthly_budget.map(|b| b.remaining(total)),
            budget_used_percentage: monthly_budget.map(|b| b.used_percentage(total)),
        }
    }
}

/// Totals for one category or store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub total: Money,
    pub item_count: usize,
    pub average: Money,
    /// Share of the snapshot's total spending
    pub percentage: f64,
}

pub type CategorySummary = GroupSummary;
pub type StoreSummary = GroupSummary;

/// Per-category totals, largest first (name order on ties)
pub fn category_summaries<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> Vec<CategorySummary> {
    summarise_groups(items, |item| &item.category)
}

/// Per-store totals, largest first (name order on ties)
pub fn store_summaries<'a>(items: impl IntoIterator<Item = &'a GroceryItem>) -> Vec<StoreSummary> {
    summarise_groups(items, |item| &item.store_name)
}

fn summarise_groups<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
    key: impl Fn(&'a GroceryItem) -> &'a String,
) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<&'a String, (Money, usize)> = BTreeMap::new();
    let mut grand_total = Money::zero();

    for item in items {
        let cost = item.total_cost();
        let entry = groups.entry(key(item)).or_insert((Money::zero(), 0));
        entry.0 += cost;
        entry.1 += 1;
        grand_total += cost;
    }

    let mut summaries: Vec<GroupSummary> = groups
        .into_iter()
        .map(|(name, (total, count))| GroupSummary {
            name: name.clone(),
            total,
            item_count: count,
            average: total.divide(count).unwrap_or_default(),
            percentage: total.percentage_of(grand_total),
        })
        .collect();

    // BTreeMap order is by name; a stable sort keeps it for equal totals
    summaries.sort_by(|a, b| b.total.cmp(&a.total));
    summaries
}

/// Counts and totals for the whole list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListStatistics {
    pub total_items: usize,
    pub purchased_items: usize,
    pub unpurchased_items: usize,
    pub total_cost: Money,
    pub purchased_cost: Money,
    pub unpurchased_cost: Money,
    pub categories: usize,
    pub stores: usize,
}

impl ListStatistics {
    pub fn compute<'a>(items: impl IntoIterator<Item = &'a GroceryItem>) -> Self {
        let mut stats = Self::default();
        let mut categories = std::collections::BTreeSet::new();
        let mut stores = std::collections::BTreeSet::new();

        for item in items {
            let cost = item.total_cost();
            stats.total_items += 1;
            stats.total_cost += cost;
            if item.purchased {
                stats.purchased_items += 1;
                stats.purchased_cost += cost;
            } else {
                stats.unpurchased_items += 1;
                stats.unpurchased_cost += cost;
            }
            categories.insert(item.category.as_str());
            stores.insert(item.store_name.as_str());
        }

        stats.categories = categories.len();
        stats.stores = stores.len();
        stats
    }
}
