//! Actions accepted by the application state

use chrono::NaiveDate;

use crate::filter::TransactionFilter;
use crate::models::{
    Budget, BudgetId, BudgetMonth, Category, CategoryId, Money, Transaction, TransactionId,
    TransactionType,
};

/// Fields for a new transaction; the id is assigned by the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionType,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    pub category: Option<CategoryId>,
}

/// Partial update of an existing transaction; unset fields are kept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionType>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` removes the category
    pub category: Option<Option<CategoryId>>,
}

/// A state change
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the transaction collection
    LoadTransactions(Vec<Transaction>),
    /// Replace the category collection
    LoadCategories(Vec<Category>),
    /// Replace the budget collection
    LoadBudgets(Vec<Budget>),

    AddTransaction(TransactionDraft),
    UpdateTransaction(TransactionId, TransactionPatch),
    DeleteTransaction(TransactionId),

    AddCategory {
        name: String,
        kind: TransactionType,
    },
    /// Remove a category; its transactions keep their label
    DeleteCategory(CategoryId),
    /// Add any of the starter categories that do not exist yet
    CreateDefaultCategories,

    /// Create or replace the budget for (month, category)
    SetBudget {
        month: BudgetMonth,
        category: Option<CategoryId>,
        amount: Money,
    },
    DeleteBudget(BudgetId),

    SetFilter(TransactionFilter),
    ClearFilter,
}
