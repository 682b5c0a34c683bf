//! Category model
//!
//! Categories classify transactions as income or expense. A name is unique
//! per (name, type) pair, so "Other" may exist once as income and once as
//! expense.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Label used for transactions that carry no category
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Maximum length of a category name
pub const MAX_NAME_LEN: usize = 100;

/// Whether a record is money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Parse "income"/"INCOME"/"expense"/"EXPENSE"
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Some(Self::Income),
            "EXPENSE" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-defined category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Category {
    /// Create a new category
    pub fn new(id: CategoryId, name: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    /// Whether this category has the given name and type (name compared
    /// case-insensitively, the way the API's uniqueness check behaves for
    /// user input)
    pub fn same_identity(&self, name: &str, kind: TransactionType) -> bool {
        self.kind == kind && self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

/// Validate a category name
pub fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(len));
    }

    Ok(())
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// The starter set offered to new users
pub fn default_categories() -> Vec<(&'static str, TransactionType)> {
    use TransactionType::{Expense, Income};

    vec![
        ("Salary", Income),
        ("Freelance", Income),
        ("Investment", Income),
        ("Other Income", Income),
        ("Groceries", Expense),
        ("Rent", Expense),
        ("Utilities", Expense),
        ("Transportation", Expense),
        ("Entertainment", Expense),
        ("Healthcare", Expense),
        ("Shopping", Expense),
        ("Other Expense", Expense),
    ]
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} characters, max {})",
                len, MAX_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
