//! Reports module for budget-tracker
//!
//! Pure derivations over the loaded collections: income/expense totals,
//! per-category breakdowns, monthly trends, budget comparisons and the
//! dashboard that combines them. Nothing here performs I/O or fails; bad
//! input has already been coerced by the ingest layer.

pub mod budget;
pub mod by_category;
pub mod dashboard;
pub mod summary;
pub mod trend;

pub use budget::{
    budget_vs_actual, month_progress, planned_for_month, BudgetComparison, BudgetProgress,
};
pub use by_category::{group_by_category, top_categories, CategoryTotal};
pub use dashboard::Dashboard;
pub use summary::{summarize, Summary};
pub use trend::{cashflow_by_month, trend_by_month, trend_by_month_of, MonthlyCashflow, MonthlyTotal};
