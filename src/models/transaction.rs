//! Transaction model
//!
//! A single income or expense record. The API denormalises the category's
//! name onto each transaction; that label survives deletion of the category
//! and is what the breakdown reports group on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{TransactionType, UNKNOWN_CATEGORY};
use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::month::BudgetMonth;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Amount (always positive; the type carries the direction)
    pub amount: Money,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Transaction date
    pub date: NaiveDate,

    /// Category reference, if any
    pub category: Option<CategoryId>,

    /// Category label as last seen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl Transaction {
    /// Create a new uncategorized transaction
    pub fn new(id: TransactionId, kind: TransactionType, amount: Money, date: NaiveDate) -> Self {
        Self {
            id,
            kind,
            amount,
            description: String::new(),
            date,
            category: None,
            category_name: None,
        }
    }

    /// Builder-style category assignment
    pub fn with_category(mut self, id: CategoryId, name: impl Into<String>) -> Self {
        self.category = Some(id);
        self.category_name = Some(name.into());
        self
    }

    /// Builder-style description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// The month this transaction falls in
    pub fn month(&self) -> BudgetMonth {
        BudgetMonth::of(self.date)
    }

    /// Display label for the category, "Unknown" when missing
    pub fn category_label(&self) -> &str {
        self.category_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date,
            self.kind,
            self.amount,
            self.category_label()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    CategoryTypeMismatch {
        category: String,
        expected: TransactionType,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
            Self::CategoryTypeMismatch { category, expected } => {
                write!(f, "Category '{}' type must be {}", category, expected)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
