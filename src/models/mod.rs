//! Core data models for budget-tracker
//!
//! This module contains the records the API hands out (transactions,
//! categories, budgets) and the value types they are built from.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod page;
pub mod transaction;

pub use budget::Budget;
pub use category::{default_categories, Category, TransactionType, UNKNOWN_CATEGORY};
pub use ids::{BudgetId, CategoryId, TransactionId};
pub use money::Money;
pub use month::BudgetMonth;
pub use page::{Listing, Page};
pub use transaction::Transaction;
