//! Budget repository backed by budget.json
//!
//! Holds at most one budget per period. A period without a budget is simply
//! absent from the file.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{GroceryError, GroceryResult};
use crate::models::{Budget, BudgetPeriod};

use super::file_io::{read_json, write_json_atomic};

type BudgetMap = BTreeMap<BudgetPeriod, Budget>;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RefCell<BudgetMap>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RefCell::new(BTreeMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> GroceryResult<()> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut loaded = BTreeMap::new();
        for budget in file_data.budgets {
            if budget.limit_amount.is_negative() {
                return Err(GroceryError::Storage(format!(
                    "{} budget in {} has a negative limit",
                    budget.period,
                    self.path.display()
                )));
            }
            loaded.insert(budget.period, budget);
        }

        *self.borrow_mut()? = loaded;
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> GroceryResult<()> {
        let budgets = self.borrow()?;
        self.persist(&budgets)
    }

    pub fn get(&self, period: BudgetPeriod) -> GroceryResult<Option<Budget>> {
        Ok(self.borrow()?.get(&period).cloned())
    }

    /// Configured budgets, weekly before monthly
    pub fn get_all(&self) -> GroceryResult<Vec<Budget>> {
        Ok(self.borrow()?.values().cloned().collect())
    }

    /// Store a budget, replacing any budget for the same period
    ///
    /// Returns the replaced budget.
    pub fn set(&self, budget: Budget) -> GroceryResult<Option<Budget>> {
        self.mutate(|budgets| budgets.insert(budget.period, budget))
    }

    /// Remove the budget for `period`, returning it if one existed
    pub fn clear(&self, period: BudgetPeriod) -> GroceryResult<Option<Budget>> {
        if !self.borrow()?.contains_key(&period) {
            return Ok(None);
        }
        self.mutate(|budgets| budgets.remove(&period))
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut BudgetMap) -> R) -> GroceryResult<R> {
        let mut budgets = self.borrow_mut()?;
        let snapshot = budgets.clone();
        let result = f(&mut budgets);

        if let Err(e) = self.persist(&budgets) {
            *budgets = snapshot;
            return Err(e);
        }
        Ok(result)
    }

    fn persist(&self, budgets: &BudgetMap) -> GroceryResult<()> {
        let file_data = BudgetData {
            budgets: budgets.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    fn borrow(&self) -> GroceryResult<Ref<'_, BudgetMap>> {
        self.budgets
            .try_borrow()
            .map_err(|e| GroceryError::Storage(format!("Budget store is busy: {}", e)))
    }

    fn borrow_mut(&self) -> GroceryResult<RefMut<'_, BudgetMap>> {
        self.budgets
            .try_borrow_mut()
            .map_err(|e| GroceryError::Storage(format!("Budget store is busy: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budget.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_unset_budget_is_absent() {
        let (_temp, repo) = create_test_repo();
        assert!(repo.get(BudgetPeriod::Weekly).unwrap().is_none());
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_set_replaces_and_persists() {
        let (temp, repo) = create_test_repo();
        let first = Budget::new(BudgetPeriod::Monthly, Money::from_cents(40000));
        assert!(repo.set(first.clone()).unwrap().is_none());

        let second = Budget::new(BudgetPeriod::Monthly, Money::from_cents(45000));
        assert_eq!(repo.set(second).unwrap(), Some(first));

        let reopened = BudgetRepository::new(temp.path().join("budget.json"));
        reopened.load().unwrap();
        let loaded = reopened.get(BudgetPeriod::Monthly).unwrap().unwrap();
        assert_eq!(loaded.limit_amount, Money::from_cents(45000));
    }

    #[test]
    fn test_get_all_ordered_by_period() {
        let (_temp, repo) = create_test_repo();
        repo.set(Budget::new(BudgetPeriod::Monthly, Money::from_cents(100)))
            .unwrap();
        repo.set(Budget::new(BudgetPeriod::Weekly, Money::from_cents(50)))
            .unwrap();

        let periods: Vec<_> = repo.get_all().unwrap().iter().map(|b| b.period).collect();
        assert_eq!(periods, vec![BudgetPeriod::Weekly, BudgetPeriod::Monthly]);
    }

    #[test]
    fn test_clear() {
        let (_temp, repo) = create_test_repo();
        repo.set(Budget::new(BudgetPeriod::Weekly, Money::from_cents(5000)))
            .unwrap();

        assert!(repo.clear(BudgetPeriod::Weekly).unwrap().is_some());
        assert!(repo.clear(BudgetPeriod::Weekly).unwrap().is_none());
        assert!(repo.get(BudgetPeriod::Weekly).unwrap().is_none());
    }
}
