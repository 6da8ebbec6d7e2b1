//! Spending totals by category, store and time window
//!
//! Every function takes the item snapshot explicitly. Pass the purchased
//! subset when the question is "how much was spent".

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};

use crate::models::{GroceryItem, Money};

use super::window::DateWindow;

/// Sum of `total_cost` over all items
pub fn total_spent<'a>(items: impl IntoIterator<Item = &'a GroceryItem>) -> Money {
    items.into_iter().map(GroceryItem::total_cost).sum()
}

/// Total cost per category; categories without items do not appear
pub fn spending_by_category<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> BTreeMap<String, Money> {
    group_totals(items, |item| &item.category)
}

/// Total cost per store; stores without items do not appear
pub fn spending_by_store<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
) -> BTreeMap<String, Money> {
    group_totals(items, |item| &item.store_name)
}

fn group_totals<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
    key: impl Fn(&'a GroceryItem) -> &'a String,
) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for item in items {
        *totals.entry(key(item).clone()).or_default() += item.total_cost();
    }
    totals
}

/// Total cost of items whose relevant date is in `[start, end)`
pub fn spending_in_window<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
    start: NaiveDate,
    end: NaiveDate,
) -> Money {
    let window = DateWindow::new(start, end);
    total_spent(
        items
            .into_iter()
            .filter(|item| window.contains(item.relevant_date())),
    )
}

/// Spending in the calendar week containing `reference`
pub fn weekly_spending<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
    reference: NaiveDate,
    week_start: Weekday,
) -> Money {
    let week = DateWindow::week_containing(reference, week_start);
    spending_in_window(items, week.start, week.end)
}

/// Spending in the calendar month containing `reference`
pub fn monthly_spending<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
    reference: NaiveDate,
) -> Money {
    let month = DateWindow::month_containing(reference);
    spending_in_window(items, month.start, month.end)
}

/// Spending per day for the `days` days ending on `last_day`
///
/// Days without spending are included with a zero amount.
pub fn daily_spending<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
    last_day: NaiveDate,
    days: u32,
) -> Vec<(NaiveDate, Money)> {
    let window = DateWindow::last_days(last_day, days);
    let mut series: BTreeMap<NaiveDate, Money> =
        window.days().map(|day| (day, Money::zero())).collect();

    for item in items {
        if let Some(total) = series.get_mut(&item.relevant_date()) {
            *total += item.total_cost();
        }
    }

    series.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::test_support::{item, purchased};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_by_category_empty() {
        let items: Vec<GroceryItem> = Vec::new();
        assert!(spending_by_category(&items).is_empty());
    }

    #[test]
    fn test_by_category_sums() {
        let items = vec![
            item(1, "x", "A", "S", 1, 1000),
            item(2, "y", "A", "S", 1, 500),
            item(3, "z", "B", "S", 1, 300),
        ];
        let totals = spending_by_category(&items);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals["A"], Money::from_cents(1500));
        assert_eq!(totals["B"], Money::from_cents(300));
    }

    #[test]
    fn test_by_store_uses_total_cost() {
        let items = vec![
            item(1, "Eggs", "Dairy", "Aldi", 3, 250),
            item(2, "Milk", "Dairy", "Lidl", 2, 100),
        ];
        let totals = spending_by_store(&items);
        assert_eq!(totals["Aldi"], Money::from_cents(750));
        assert_eq!(totals["Lidl"], Money::from_cents(200));
    }

    #[test]
    fn test_window_is_half_open() {
        let items = vec![
            purchased(item(1, "a", "c", "s", 1, 100), date(2025, 3, 1)),
            purchased(item(2, "b", "c", "s", 1, 200), date(2025, 3, 31)),
            purchased(item(3, "c", "c", "s", 1, 400), date(2025, 4, 1)),
        ];
        assert_eq!(
            spending_in_window(&items, date(2025, 3, 1), date(2025, 4, 1)),
            Money::from_cents(300)
        );
        assert_eq!(monthly_spending(&items, date(2025, 3, 15)), Money::from_cents(300));
    }

    #[test]
    fn test_weekly_spending() {
        let items = vec![
            purchased(item(1, "a", "c", "s", 1, 100), date(2025, 3, 9)),
            purchased(item(2, "b", "c", "s", 1, 200), date(2025, 3, 10)),
            purchased(item(3, "c", "c", "s", 1, 400), date(2025, 3, 16)),
        ];
        let thursday = date(2025, 3, 13);
        assert_eq!(weekly_spending(&items, thursday, Weekday::Mon), Money::from_cents(600));
        assert_eq!(weekly_spending(&items, thursday, Weekday::Sun), Money::from_cents(300));
    }

    #[test]
    fn test_daily_series_includes_zero_days() {
        let items = vec![
            purchased(item(1, "a", "c", "s", 2, 150), date(2025, 3, 2)),
            purchased(item(2, "b", "c", "s", 1, 100), date(2025, 3, 2)),
            purchased(item(3, "c", "c", "s", 1, 999), date(2025, 2, 1)),
        ];
        let series = daily_spending(&items, date(2025, 3, 3), 3);

        assert_eq!(
            series,
            vec![
                (date(2025, 3, 1), Money::zero()),
                (date(2025, 3, 2), Money::from_cents(400)),
                (date(2025, 3, 3), Money::zero()),
            ]
        );
    }
}
