//! Budget model
//!
//! A planned spending cap for one month. Without a category it is the overall
//! monthly budget; with one it caps that category only.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::month::BudgetMonth;

/// A monthly budget, optionally scoped to a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Amount planned for the month
    pub amount: Money,

    /// The month this budget applies to
    pub month: BudgetMonth,

    /// Category this budget caps; `None` for the overall budget
    #[serde(default)]
    pub category: Option<CategoryId>,
}

impl Budget {
    /// Create an overall budget for a month
    pub fn new(id: BudgetId, month: BudgetMonth, amount: Money) -> Self {
        Self {
            id,
            amount,
            month,
            category: None,
        }
    }

    /// Create a budget for a single category
    pub fn for_category(
        id: BudgetId,
        month: BudgetMonth,
        category: CategoryId,
        amount: Money,
    ) -> Self {
        Self {
            id,
            amount,
            month,
            category: Some(category),
        }
    }

    /// Whether this is the overall (uncategorized) budget
    pub fn is_overall(&self) -> bool {
        self.category.is_none()
    }

    /// Whether this budget row is the one for `category` in `month`
    pub fn applies_to(&self, category: Option<CategoryId>, month: BudgetMonth) -> bool {
        self.category == category && self.month == month
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(category) => write!(f, "Budget for {} ({}): {}", self.month, category, self.amount),
            None => write!(f, "Budget for {}: {}", self.month, self.amount),
        }
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Budget amount must be greater than 0"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
