//! Transaction filtering and ordering
//!
//! Mirrors the query parameters the transaction list endpoint understands,
//! so the same filter can be sent upstream or applied to a local collection.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{BudgetMonth, CategoryId, Money, Transaction, TransactionType};

/// Criteria a transaction must satisfy to be visible. Unset fields match all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Only this type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,

    /// Only this category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,

    /// On or after this date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,

    /// On or before this date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,

    /// Amount at least this much
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_min: Option<Money>,

    /// Amount at most this much
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_max: Option<Money>,

    /// Case-insensitive substring of the description or category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Calendar month number (1-12), any year unless `year` is also set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,

    /// Calendar year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl TransactionFilter {
    /// A filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one type
    pub fn of_kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restrict to one category
    pub fn in_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict to an inclusive date range
    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Restrict to a single calendar month
    pub fn in_month(mut self, month: BudgetMonth) -> Self {
        self.month = Some(month.month());
        self.year = Some(month.year());
        self
    }

    /// Restrict to descriptions containing `needle`
    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.description = Some(needle.into());
        self
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check a single transaction against every set criterion
    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.kind.is_some_and(|kind| txn.kind != kind) {
            return false;
        }
        if self.category.is_some() && txn.category != self.category {
            return false;
        }
        if self.date_from.is_some_and(|from| txn.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| txn.date > to) {
            return false;
        }
        if self.amount_min.is_some_and(|min| txn.amount < min) {
            return false;
        }
        if self.amount_max.is_some_and(|max| txn.amount > max) {
            return false;
        }
        if self.month.is_some_and(|month| txn.date.month() != month) {
            return false;
        }
        if self.year.is_some_and(|year| txn.date.year() != year) {
            return false;
        }
        if let Some(needle) = self.description.as_deref().map(str::trim) {
            if !needle.is_empty() {
                let needle = needle.to_lowercase();
                let hit = txn.description.to_lowercase().contains(&needle)
                    || txn.category_label().to_lowercase().contains(&needle);
                if !hit {
                    return false;
                }
            }
        }
        true
    }

    /// The matching subset, in input order
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

/// Sort orders supported for transaction lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionOrdering {
    /// Newest first (ties: highest id first)
    #[default]
    DateDesc,
    /// Oldest first (ties: lowest id first)
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

impl TransactionOrdering {
    /// Parse the API's ordering parameter ("-date", "date", "-amount", "amount")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "-date" | "date_desc" => Some(Self::DateDesc),
            "date" | "date_asc" => Some(Self::DateAsc),
            "-amount" | "amount_desc" => Some(Self::AmountDesc),
            "amount" | "amount_asc" => Some(Self::AmountAsc),
            _ => None,
        }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            Self::DateDesc => b.date.cmp(&a.date).then(b.id.cmp(&a.id)),
            Self::DateAsc => a.date.cmp(&b.date).then(a.id.cmp(&b.id)),
            Self::AmountDesc => b.amount.cmp(&a.amount).then(b.date.cmp(&a.date)),
            Self::AmountAsc => a.amount.cmp(&b.amount).then(b.date.cmp(&a.date)),
        }
    }
}

/// Sort transactions in place
pub fn sort_transactions(transactions: &mut [Transaction], ordering: TransactionOrdering) {
    transactions.sort_by(|a, b| ordering.compare(a, b));
}

/// The `limit` most recent transactions, newest first
pub fn most_recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut recent = transactions.to_vec();
    sort_transactions(&mut recent, TransactionOrdering::DateDesc);
    recent.truncate(limit);
    recent
}
