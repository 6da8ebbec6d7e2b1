//! Expense aggregation
//!
//! Pure functions that turn a snapshot of grocery items into spending
//! figures: totals per category, store and time window, budget status,
//! price distribution, summary statistics and savings insights. Nothing in
//! this module touches storage; callers pass the items they mean.

pub mod distribution;
pub mod insights;
pub mod spending;
pub mod stats;
pub mod status;
pub mod window;

pub use distribution::{price_distribution, PriceBuckets};
pub use insights::{
    budget_alerts, cheapest_alternative, optimization_suggestions, store_comparison, AlertKind,
    BudgetAlert, StoreComparison, Suggestion,
};
pub use spending::{
    daily_spending, monthly_spending, spending_by_category, spending_by_store,
    spending_in_window, total_spent, weekly_spending,
};
pub use stats::{
    average_price_per_unit, average_total_cost, category_summaries, cheapest,
    median_price_per_unit, most_expensive, store_summaries, CategorySummary, ExpenseSummary,
    GroupSummary, ListStatistics, StoreSummary,
};
pub use status::{
    budget_status, budget_status_with_threshold, BudgetCheck, BudgetStatus,
    DEFAULT_NEAR_THRESHOLD,
};
pub use window::DateWindow;
