//! Grocery item model
//!
//! A grocery item is a single list entry: what to buy, how much, at what
//! unit price and where. The total cost is always derived from the current
//! quantity and price and is never stored.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ItemId;
use super::money::Money;
use super::quantity::Quantity;
use crate::error::GroceryResult;
use crate::validation;

/// Validated fields for a new item, before the store assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub quantity: Quantity,
    pub unit: String,
    pub price_per_unit: Money,
    pub store_name: String,
    pub notes: Option<String>,
    /// Purchase date if the item is recorded as already bought
    pub purchased_on: Option<NaiveDate>,
}

/// Validated partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<Quantity>,
    pub unit: Option<String>,
    pub price_per_unit: Option<Money>,
    pub store_name: Option<String>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
}

impl ItemPatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A grocery list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Unique identifier, assigned by the store
    pub id: ItemId,

    /// Item name
    pub name: String,

    /// Category (free text, see `catalog::COMMON_CATEGORIES` for suggestions)
    pub category: String,

    /// How much to buy, in `unit`
    pub quantity: Quantity,

    /// Unit of measure (kg, piece, bottle, ...)
    pub unit: String,

    /// Price for one unit
    pub price_per_unit: Money,

    /// Store the item is bought at
    pub store_name: String,

    /// Optional free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Whether the item has been bought
    #[serde(default)]
    pub purchased: bool,

    /// Date the item was bought, present only while `purchased` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// When the item was last modified
    pub updated_at: DateTime<Utc>,
}

impl GroceryItem {
    /// Build a stored item from validated input
    pub fn new(id: ItemId, input: NewItem) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            category: input.category,
            quantity: input.quantity,
            unit: input.unit,
            price_per_unit: input.price_per_unit,
            store_name: input.store_name,
            notes: input.notes,
            purchased: input.purchased_on.is_some(),
            purchase_date: input.purchased_on,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total cost: quantity x price per unit, computed on every call
    pub fn total_cost(&self) -> Money {
        self.quantity.cost_at(self.price_per_unit)
    }

    /// Date used for time-window aggregation
    ///
    /// Purchased items count on their purchase date, everything else on the
    /// local calendar day it was created.
    pub fn relevant_date(&self) -> NaiveDate {
        match (self.purchased, self.purchase_date) {
            (true, Some(date)) => date,
            _ => self.created_at.with_timezone(&Local).date_naive(),
        }
    }

    /// Mark the item as bought on `date`
    pub fn mark_purchased(&mut self, date: NaiveDate) {
        self.purchased = true;
        self.purchase_date = Some(date);
        self.updated_at = Utc::now();
    }

    /// Mark the item as not bought, clearing the purchase date
    pub fn mark_unpurchased(&mut self) {
        self.purchased = false;
        self.purchase_date = None;
        self.updated_at = Utc::now();
    }

    /// Apply a validated patch
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(price) = patch.price_per_unit {
            self.price_per_unit = price;
        }
        if let Some(store) = patch.store_name {
            self.store_name = store;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        self.updated_at = Utc::now();
    }

    /// Re-check every field invariant (used for rows loaded from files)
    pub fn validate(&self) -> GroceryResult<()> {
        validation::validate_name(&self.name)?;
        validation::validate_text_field("category", &self.category)?;
        validation::validate_text_field("unit", &self.unit)?;
        validation::validate_text_field("store", &self.store_name)?;
        validation::validate_notes(self.notes.as_deref().unwrap_or(""))?;
        validation::validate_price_value(self.price_per_unit, &self.price_per_unit.to_string())?;
        validation::validate_quantity_value(self.quantity, &self.quantity.to_string())?;
        if self.purchase_date.is_some() && !self.purchased {
            return Err(crate::error::GroceryError::Validation(format!(
                "Item {} has a purchase date but is not purchased",
                self.id
            )));
        }
        Ok(())
    }
}
