//! Budget service
//!
//! Sets and clears the weekly and monthly budgets and evaluates current
//! spending against them.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::{GroceryError, GroceryResult};
use crate::expense::{self, BudgetAlert, BudgetCheck, ExpenseSummary};
use crate::models::{Budget, BudgetPeriod, GroceryItem, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Set the limit for a period, replacing any previous limit
    pub fn set(&self, period: BudgetPeriod, limit: Money) -> GroceryResult<Budget> {
        if limit.is_negative() {
            return Err(GroceryError::Budget(format!(
                "{} budget cannot be negative ({})",
                period, limit
            )));
        }

        let budget = Budget::new(period, limit.rounded());
        let previous = self.storage.budget.set(budget.clone())?;

        let entity_id = period.to_string().to_lowercase();
        match previous {
            Some(before) => self
                .storage
                .log_update(EntityType::Budget, entity_id, None, &before, &budget)?,
            None => self
                .storage
                .log_create(EntityType::Budget, entity_id, None, &budget)?,
        }

        Ok(budget)
    }

    /// The budget for a period, if one is set
    pub fn get(&self, period: BudgetPeriod) -> GroceryResult<Option<Budget>> {
        self.storage.budget.get(period)
    }

    pub fn get_all(&self) -> GroceryResult<Vec<Budget>> {
        self.storage.budget.get_all()
    }

    /// Remove the budget for a period
    pub fn clear(&self, period: BudgetPeriod) -> GroceryResult<Budget> {
        let removed = self
            .storage
            .budget
            .clear(period)?
            .ok_or_else(|| GroceryError::budget_not_found(period.to_string()))?;

        self.storage.log_delete(
            EntityType::Budget,
            period.to_string().to_lowercase(),
            None,
            &removed,
        )?;

        Ok(removed)
    }

    /// Every configured budget checked against spending around `reference`
    pub fn status(&self, reference: NaiveDate) -> GroceryResult<Vec<BudgetCheck>> {
        let purchased = self.purchased()?;
        Ok(self
            .get_all()?
            .iter()
            .map(|budget| {
                BudgetCheck::evaluate(
                    budget,
                    &purchased,
                    reference,
                    self.settings.week_start.weekday(),
                    self.settings.near_threshold(),
                )
            })
            .collect())
    }

    /// Check a single period; `NotFound` if no budget is set for it
    pub fn status_for(&self, period: BudgetPeriod, reference: NaiveDate) -> GroceryResult<BudgetCheck> {
        let budget = self
            .get(period)?
            .ok_or_else(|| GroceryError::budget_not_found(period.to_string()))?;
        let purchased = self.purchased()?;
        Ok(BudgetCheck::evaluate(
            &budget,
            &purchased,
            reference,
            self.settings.week_start.weekday(),
            self.settings.near_threshold(),
        ))
    }

    /// Budget alerts plus a cheaper-alternatives tip
    pub fn alerts(&self, reference: NaiveDate) -> GroceryResult<Vec<BudgetAlert>> {
        let checks = self.status(reference)?;
        let purchased = self.purchased()?;
        Ok(expense::budget_alerts(
            &checks,
            &purchased,
            self.settings.expensive_threshold,
        ))
    }

    /// Spending overview for the month of `reference`
    pub fn monthly_summary(&self, reference: NaiveDate) -> GroceryResult<ExpenseSummary> {
        let purchased = self.purchased()?;
        let monthly = self.get(BudgetPeriod::Monthly)?;
        Ok(ExpenseSummary::for_month(&purchased, reference, monthly.as_ref()))
    }

    fn purchased(&self) -> GroceryResult<Vec<GroceryItem>> {
        Ok(self
            .storage
            .items
            .get_all()?
            .into_iter()
            .filter(|i| i.purchased)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::GroceryPaths;
    use crate::expense::{AlertKind, BudgetStatus};
    use crate::services::ItemService;
    use crate::validation::ItemInput;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn buy(storage: &Storage, name: &str, price: &str, on: NaiveDate) {
        let items = ItemService::new(storage);
        let item = items
            .add(&ItemInput {
                name: name.into(),
                category: "Pantry Staples".into(),
                quantity: "1".into(),
                unit: "pack".into(),
                price: price.into(),
                store: "Aldi".into(),
                notes: None,
                purchased_on: None,
            })
            .unwrap();
        items.mark_purchased(item.id, Some(on)).unwrap();
    }

    #[test]
    fn test_set_and_replace() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);

        service.set(BudgetPeriod::Weekly, Money::from_cents(5000)).unwrap();
        service.set(BudgetPeriod::Weekly, Money::from_cents(6000)).unwrap();

        let budget = service.get(BudgetPeriod::Weekly).unwrap().unwrap();
        assert_eq!(budget.limit_amount, Money::from_cents(6000));
        assert!(service.get(BudgetPeriod::Monthly).unwrap().is_none());

        let ops: Vec<_> = storage
            .audit()
            .read_all()
            .unwrap()
            .iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update]);
    }

    #[test]
    fn test_negative_limit_rejected() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);

        let err = service
            .set(BudgetPeriod::Monthly, Money::from_cents(-100))
            .unwrap_err();
        assert!(matches!(err, GroceryError::Budget(_)));
    }

    #[test]
    fn test_clear_missing_is_not_found() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);
        assert!(service.clear(BudgetPeriod::Monthly).unwrap_err().is_not_found());
    }

    #[test]
    fn test_status_and_alerts() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);
        let today = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();

        buy(&storage, "Coffee", "14.00", today);
        buy(&storage, "Tea", "4.50", today);
        service.set(BudgetPeriod::Weekly, Money::from_cents(2000)).unwrap();
        service.set(BudgetPeriod::Monthly, Money::from_cents(10000)).unwrap();

        let checks = service.status(today).unwrap();
        assert_eq!(checks[0].period, BudgetPeriod::Weekly);
        assert_eq!(checks[0].status, BudgetStatus::Near);
        assert_eq!(checks[1].status, BudgetStatus::Under);

        let alerts = service.alerts(today).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::Warning);
        assert_eq!(alerts[1].kind, AlertKind::Suggestion);
        assert!(alerts[1].message.contains("Coffee"));

        let summary = service.monthly_summary(today).unwrap();
        assert_eq!(summary.total_spent, Money::from_cents(1850));
        assert_eq!(summary.budget_remaining, Some(Money::from_cents(8150)));
    }
}
