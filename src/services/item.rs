//! Item service
//!
//! CRUD, purchase tracking and filtered/sorted listing for grocery items.
//! Every mutation is persisted by the repository and then written to the
//! audit log.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};

use crate::audit::EntityType;
use crate::error::{GroceryError, GroceryResult};
use crate::expense::{self, ListStatistics};
use crate::models::{GroceryItem, ItemId, ItemPatch, Money, NewItem};
use crate::storage::Storage;
use crate::validation::ItemInput;

/// Filter for listing items; all set criteria must match
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Exact category, case-insensitive
    pub category: Option<String>,
    /// Exact store, case-insensitive
    pub store: Option<String>,
    /// Substring of the name, case-insensitive
    pub name_contains: Option<String>,
    /// Substring of name, category or store, case-insensitive
    pub search: Option<String>,
    /// Inclusive lower bound on price per unit
    pub min_price: Option<Money>,
    /// Inclusive upper bound on price per unit
    pub max_price: Option<Money>,
    pub purchased: Option<bool>,
    /// Maximum number of items to return (applied after sorting)
    pub limit: Option<usize>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn price_range(mut self, min: Money, max: Money) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    pub fn min_price(mut self, min: Money) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn max_price(mut self, max: Money) -> Self {
        self.max_price = Some(max);
        self
    }

    pub fn purchased(mut self, purchased: bool) -> Self {
        self.purchased = Some(purchased);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `item` satisfies every criterion
    pub fn matches(&self, item: &GroceryItem) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.trim().to_lowercase())
        }

        if let Some(category) = &self.category {
            if !item.category.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        if let Some(store) = &self.store {
            if !item.store_name.eq_ignore_ascii_case(store.trim()) {
                return false;
            }
        }
        if let Some(fragment) = &self.name_contains {
            if !contains_ci(&item.name, fragment) {
                return false;
            }
        }
        if let Some(query) = &self.search {
            if !(contains_ci(&item.name, query)
                || contains_ci(&item.category, query)
                || contains_ci(&item.store_name, query))
            {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| item.price_per_unit < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| item.price_per_unit > max) {
            return false;
        }
        if self.purchased.is_some_and(|p| item.purchased != p) {
            return false;
        }
        true
    }
}

/// Field to sort item listings by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Category,
    Store,
    PricePerUnit,
    TotalCost,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "store" => Ok(Self::Store),
            "price" | "price_per_unit" => Ok(Self::PricePerUnit),
            "total" | "total_cost" => Ok(Self::TotalCost),
            other => Err(format!(
                "Unknown sort field '{}' (expected name, category, store, price or total)",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Store => "store",
            Self::PricePerUnit => "price",
            Self::TotalCost => "total",
        };
        f.write_str(name)
    }
}

/// Sort order for item listings; ties always break by ascending id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSort {
    pub key: SortKey,
    pub descending: bool,
}

impl ItemSort {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            descending: true,
        }
    }

    pub fn compare(&self, a: &GroceryItem, b: &GroceryItem) -> Ordering {
        let name = |i: &GroceryItem| i.name.to_lowercase();
        let ordering = match self.key {
            SortKey::Name => name(a).cmp(&name(b)),
            SortKey::Category => (a.category.to_lowercase(), name(a))
                .cmp(&(b.category.to_lowercase(), name(b))),
            SortKey::Store => (a.store_name.to_lowercase(), name(a))
                .cmp(&(b.store_name.to_lowercase(), name(b))),
            SortKey::PricePerUnit => a.price_per_unit.cmp(&b.price_per_unit),
            SortKey::TotalCost => a.total_cost().cmp(&b.total_cost()),
        };
        let ordering = if self.descending {
            ordering.reverse()
        } else {
            ordering
        };
        ordering.then(a.id.cmp(&b.id))
    }
}

/// Service for grocery item management
pub struct ItemService<'a> {
    storage: &'a Storage,
}

impl<'a> ItemService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate raw input and create the item
    pub fn add(&self, input: &ItemInput) -> GroceryResult<GroceryItem> {
        self.create(input.validate()?)
    }

    /// Create an item from validated fields
    pub fn create(&self, input: NewItem) -> GroceryResult<GroceryItem> {
        let item = self.storage.items.create(input)?;

        self.storage.log_create(
            EntityType::Item,
            item.id.to_string(),
            Some(item.name.clone()),
            &item,
        )?;

        Ok(item)
    }

    /// Get an item, failing with `NotFound` for an unknown id
    pub fn get(&self, id: ItemId) -> GroceryResult<GroceryItem> {
        self.storage
            .items
            .get(id)?
            .ok_or_else(|| GroceryError::item_not_found(id.to_string()))
    }

    /// Apply a validated patch
    ///
    /// An empty patch returns the item unchanged without writing anything.
    pub fn update(&self, id: ItemId, patch: ItemPatch) -> GroceryResult<GroceryItem> {
        let before = self.get(id)?;
        if patch.is_empty() {
            return Ok(before);
        }

        let after = self
            .storage
            .items
            .update(id, patch)?
            .ok_or_else(|| GroceryError::item_not_found(id.to_string()))?;

        self.storage.log_update(
            EntityType::Item,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Delete an item, returning what was removed
    pub fn delete(&self, id: ItemId) -> GroceryResult<GroceryItem> {
        let item = self.get(id)?;

        if !self.storage.items.delete(id)? {
            return Err(GroceryError::item_not_found(id.to_string()));
        }

        self.storage.log_delete(
            EntityType::Item,
            item.id.to_string(),
            Some(item.name.clone()),
            &item,
        )?;

        Ok(item)
    }

    /// Mark an item as bought on `date` (today when `None`)
    pub fn mark_purchased(&self, id: ItemId, date: Option<NaiveDate>) -> GroceryResult<GroceryItem> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        self.set_purchased(id, Some(date))
    }

    /// Mark an item as not bought yet
    pub fn mark_unpurchased(&self, id: ItemId) -> GroceryResult<GroceryItem> {
        self.set_purchased(id, None)
    }

    fn set_purchased(&self, id: ItemId, date: Option<NaiveDate>) -> GroceryResult<GroceryItem> {
        let before = self.get(id)?;
        let after = self
            .storage
            .items
            .set_purchased(id, date)?
            .ok_or_else(|| GroceryError::item_not_found(id.to_string()))?;

        self.storage.log_update(
            EntityType::Item,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Items matching `filter`, in `sort` order or ascending id order
    pub fn list(&self, filter: &ItemFilter, sort: Option<ItemSort>) -> GroceryResult<Vec<GroceryItem>> {
        let mut items: Vec<GroceryItem> = self
            .storage
            .items
            .get_all()?
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect();

        if let Some(sort) = sort {
            items.sort_by(|a, b| sort.compare(a, b));
        }
        if let Some(limit) = filter.limit {
            items.truncate(limit);
        }

        Ok(items)
    }

    pub fn list_all(&self) -> GroceryResult<Vec<GroceryItem>> {
        self.storage.items.get_all()
    }

    /// Items whose name, category or store contains `query`, by name
    pub fn search(&self, query: &str) -> GroceryResult<Vec<GroceryItem>> {
        self.list(
            &ItemFilter::new().search(query),
            Some(ItemSort::ascending(SortKey::Name)),
        )
    }

    /// Bought items; the snapshot spending figures are computed over
    pub fn purchased_items(&self) -> GroceryResult<Vec<GroceryItem>> {
        self.list(&ItemFilter::new().purchased(true), None)
    }

    /// Items priced above `threshold`, most expensive first
    pub fn expensive(&self, threshold: Money) -> GroceryResult<Vec<GroceryItem>> {
        let items = self.list(
            &ItemFilter::new(),
            Some(ItemSort::descending(SortKey::PricePerUnit)),
        )?;
        Ok(items
            .into_iter()
            .filter(|i| i.price_per_unit > threshold)
            .collect())
    }

    /// Items priced at or below `threshold`, cheapest first
    pub fn budget_friendly(&self, threshold: Money) -> GroceryResult<Vec<GroceryItem>> {
        self.list(
            &ItemFilter::new().max_price(threshold),
            Some(ItemSort::ascending(SortKey::PricePerUnit)),
        )
    }

    /// Distinct categories in use, sorted
    pub fn categories(&self) -> GroceryResult<Vec<String>> {
        self.distinct(|item| &item.category)
    }

    /// Distinct stores in use, sorted
    pub fn stores(&self) -> GroceryResult<Vec<String>> {
        self.distinct(|item| &item.store_name)
    }

    fn distinct(&self, field: impl Fn(&GroceryItem) -> &String) -> GroceryResult<Vec<String>> {
        let items = self.storage.items.get_all()?;
        let mut values: Vec<String> = items.iter().map(|i| field(i).clone()).collect();
        values.sort();
        values.dedup();
        Ok(values)
    }

    pub fn statistics(&self) -> GroceryResult<ListStatistics> {
        Ok(ListStatistics::compute(&self.storage.items.get_all()?))
    }

    /// Cheapest other item in the same category
    pub fn cheapest_alternative(&self, id: ItemId) -> GroceryResult<Option<GroceryItem>> {
        let target = self.get(id)?;
        let items = self.storage.items.get_all()?;
        Ok(expense::cheapest_alternative(&items, &target).cloned())
    }

    pub fn count(&self) -> GroceryResult<usize> {
        self.storage.items.count()
    }
}
