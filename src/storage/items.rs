//! Item repository backed by items.json
//!
//! Every mutation is written to disk before the call returns. If the write
//! fails, the in-memory state is rolled back so memory and disk agree.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GroceryError, GroceryResult};
use crate::models::{GroceryItem, ItemId, ItemPatch, NewItem};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of items.json
#[derive(Debug, Deserialize)]
struct ItemData {
    #[serde(default = "first_id")]
    next_id: ItemId,
    #[serde(default)]
    items: Vec<GroceryItem>,
}

impl Default for ItemData {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            items: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct ItemDataRef<'a> {
    next_id: ItemId,
    items: Vec<&'a GroceryItem>,
}

fn first_id() -> ItemId {
    ItemId::new(1)
}

#[derive(Debug, Clone)]
struct ItemState {
    next_id: ItemId,
    items: BTreeMap<ItemId, GroceryItem>,
}

/// Repository for grocery item persistence
pub struct ItemRepository {
    path: PathBuf,
    state: RefCell<ItemState>,
}

impl ItemRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RefCell::new(ItemState {
                next_id: first_id(),
                items: BTreeMap::new(),
            }),
        }
    }

    /// Load items from disk, re-checking every row
    pub fn load(&self) -> GroceryResult<()> {
        let file_data: ItemData = read_json(&self.path)?;

        let mut items = BTreeMap::new();
        for item in file_data.items {
            item.validate().map_err(|e| {
                GroceryError::Storage(format!(
                    "Invalid item {} in {}: {}",
                    item.id,
                    self.path.display(),
                    e
                ))
            })?;
            if items.insert(item.id, item).is_some() {
                return Err(GroceryError::Storage(format!(
                    "Duplicate item id in {}",
                    self.path.display()
                )));
            }
        }

        // A hand-edited file may carry a stale counter
        let after_max = items
            .keys()
            .next_back()
            .map(ItemId::next)
            .unwrap_or_else(first_id);
        let next_id = file_data.next_id.max(after_max);

        *self.borrow_mut()? = ItemState { next_id, items };
        Ok(())
    }

    /// Write the current state to disk
    pub fn save(&self) -> GroceryResult<()> {
        let state = self.borrow()?;
        self.persist(&state)
    }

    /// Store a new item under a freshly assigned id
    pub fn create(&self, input: NewItem) -> GroceryResult<GroceryItem> {
        self.mutate(|state| {
            let id = state.next_id;
            state.next_id = id.next();
            let item = GroceryItem::new(id, input);
            state.items.insert(id, item.clone());
            item
        })
    }

    /// Store already-validated items under fresh ids, in one write
    ///
    /// Timestamps and purchase state of the incoming items are kept.
    pub fn insert_all(&self, incoming: Vec<GroceryItem>) -> GroceryResult<Vec<GroceryItem>> {
        self.mutate(|state| {
            incoming
                .into_iter()
                .map(|mut item| {
                    item.id = state.next_id;
                    state.next_id = item.id.next();
                    state.items.insert(item.id, item.clone());
                    item
                })
                .collect()
        })
    }

    pub fn get(&self, id: ItemId) -> GroceryResult<Option<GroceryItem>> {
        Ok(self.borrow()?.items.get(&id).cloned())
    }

    /// Apply a patch; `None` if the id does not exist
    pub fn update(&self, id: ItemId, patch: ItemPatch) -> GroceryResult<Option<GroceryItem>> {
        if !self.borrow()?.items.contains_key(&id) {
            return Ok(None);
        }
        self.mutate(|state| {
            state.items.get_mut(&id).map(|item| {
                item.apply(patch);
                item.clone()
            })
        })
    }

    /// Mark purchased on `date`, or clear the purchase when `date` is `None`
    pub fn set_purchased(
        &self,
        id: ItemId,
        date: Option<NaiveDate>,
    ) -> GroceryResult<Option<GroceryItem>> {
        if !self.borrow()?.items.contains_key(&id) {
            return Ok(None);
        }
        self.mutate(|state| {
            state.items.get_mut(&id).map(|item| {
                match date {
                    Some(date) => item.mark_purchased(date),
                    None => item.mark_unpurchased(),
                }
                item.clone()
            })
        })
    }

    /// Remove an item; `false` if it did not exist
    pub fn delete(&self, id: ItemId) -> GroceryResult<bool> {
        if !self.borrow()?.items.contains_key(&id) {
            return Ok(false);
        }
        self.mutate(|state| state.items.remove(&id).is_some())
    }

    /// All items in ascending id order
    pub fn get_all(&self) -> GroceryResult<Vec<GroceryItem>> {
        Ok(self.borrow()?.items.values().cloned().collect())
    }

    pub fn count(&self) -> GroceryResult<usize> {
        Ok(self.borrow()?.items.len())
    }

    /// Id the next created item will receive
    pub fn next_id(&self) -> GroceryResult<ItemId> {
        Ok(self.borrow()?.next_id)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut ItemState) -> R) -> GroceryResult<R> {
        let mut state = self.borrow_mut()?;
        let snapshot = state.clone();
        let result = f(&mut state);

        if let Err(e) = self.persist(&state) {
            *state = snapshot;
            return Err(e);
        }
        Ok(result)
    }

    fn persist(&self, state: &ItemState) -> GroceryResult<()> {
        let file_data = ItemDataRef {
            next_id: state.next_id,
            items: state.items.values().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    fn borrow(&self) -> GroceryResult<std::cell::Ref<'_, ItemState>> {
        self.state
            .try_borrow()
            .map_err(|e| GroceryError::Storage(format!("Item store is busy: {}", e)))
    }

    fn borrow_mut(&self) -> GroceryResult<std::cell::RefMut<'_, ItemState>> {
        self.state
            .try_borrow_mut()
            .map_err(|e| GroceryError::Storage(format!("Item store is busy: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Quantity};
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ItemRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ItemRepository::new(temp_dir.path().join("items.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn new_item(name: &str, cents: i64) -> NewItem {
        NewItem {
            name: name.into(),
            category: "Pantry Staples".into(),
            quantity: Quantity::new(Decimal::from(2)).unwrap(),
            unit: "pack".into(),
            price_per_unit: Money::from_cents(cents),
            store_name: "Lidl".into(),
            notes: None,
            purchased_on: None,
        }
    }

    #[test]
    fn test_empty_load() {
        let (_temp, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.next_id().unwrap(), ItemId::new(1));
    }

    #[test]
    fn test_create_and_get() {
        let (_temp, repo) = create_test_repo();
        let created = repo.create(new_item("Rice", 250)).unwrap();

        let fetched = repo.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.total_cost(), Money::from_cents(500));
    }

    #[test]
    fn test_create_persists_immediately() {
        let (temp, repo) = create_test_repo();
        repo.create(new_item("Oats", 199)).unwrap();

        let reopened = ItemRepository::new(temp.path().join("items.json"));
        reopened.load().unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }

    #[test]
    fn test_ids_never_reused() {
        let (temp, repo) = create_test_repo();
        let a = repo.create(new_item("A", 100)).unwrap();
        let b = repo.create(new_item("B", 100)).unwrap();
        assert!(repo.delete(b.id).unwrap());

        let reopened = ItemRepository::new(temp.path().join("items.json"));
        reopened.load().unwrap();
        let c = reopened.create(new_item("C", 100)).unwrap();

        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn test_update_and_missing() {
        let (_temp, repo) = create_test_repo();
        let item = repo.create(new_item("Pasta", 120)).unwrap();

        let patch = ItemPatch {
            price_per_unit: Some(Money::from_cents(150)),
            ..Default::default()
        };
        let updated = repo.update(item.id, patch.clone()).unwrap().unwrap();
        assert_eq!(updated.total_cost(), Money::from_cents(300));

        assert!(repo.update(ItemId::new(99), patch).unwrap().is_none());
    }

    #[test]
    fn test_set_purchased() {
        let (_temp, repo) = create_test_repo();
        let item = repo.create(new_item("Flour", 90)).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();

        let bought = repo.set_purchased(item.id, Some(date)).unwrap().unwrap();
        assert_eq!(bought.purchase_date, Some(date));

        let reset = repo.set_purchased(item.id, None).unwrap().unwrap();
        assert!(!reset.purchased);
        assert!(reset.purchase_date.is_none());
    }

    #[test]
    fn test_delete_missing_leaves_list_alone() {
        let (_temp, repo) = create_test_repo();
        repo.create(new_item("Salt", 50)).unwrap();

        assert!(!repo.delete(ItemId::new(42)).unwrap());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_insert_all_assigns_fresh_ids() {
        let (_temp, repo) = create_test_repo();
        repo.create(new_item("Existing", 100)).unwrap();

        let mut foreign = GroceryItem::new(ItemId::new(1), new_item("Imported", 300));
        foreign.mark_purchased(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());

        let inserted = repo.insert_all(vec![foreign]).unwrap();
        assert_eq!(inserted[0].id, ItemId::new(2));
        assert!(inserted[0].purchased);
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_load_repairs_stale_counter() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        let item = GroceryItem::new(ItemId::new(7), new_item("Tea", 400));
        write_json_atomic(
            &path,
            &ItemDataRef {
                next_id: ItemId::new(1),
                items: vec![&item],
            },
        )
        .unwrap();

        let repo = ItemRepository::new(path);
        repo.load().unwrap();
        assert_eq!(repo.next_id().unwrap(), ItemId::new(8));
    }

    #[test]
    fn test_load_rejects_invalid_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        let mut item = GroceryItem::new(ItemId::new(1), new_item("Jam", 300));
        item.name = "   ".into();
        write_json_atomic(
            &path,
            &ItemDataRef {
                next_id: ItemId::new(2),
                items: vec![&item],
            },
        )
        .unwrap();

        let repo = ItemRepository::new(path);
        assert!(matches!(repo.load(), Err(GroceryError::Storage(_))));
    }

    #[test]
    fn test_serialized_rows_have_no_total_cost() {
        let (temp, repo) = create_test_repo();
        repo.create(new_item("Beans", 80)).unwrap();

        let raw = std::fs::read_to_string(temp.path().join("items.json")).unwrap();
        assert!(raw.contains("\"next_id\": 2"));
        assert!(!raw.contains("total_cost"));
    }
}
