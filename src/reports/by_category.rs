//! Per-category totals for one transaction type
//!
//! Buckets are keyed by the transaction's category label, so a transaction
//! lands in exactly one bucket. Uncategorised transactions use the label
//! "Unknown" and share a bucket with a category of that name. Order is by descending total, ties broken by
//! category name ascending so equal totals always come out the same way.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Money, Transaction, TransactionType};

/// Total for one category bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category label ("Unknown" when the transaction had none)
    pub category: String,
    /// Sum of amounts in this bucket
    pub total: Money,
    /// Number of transactions in this bucket
    pub transaction_count: usize,
    /// Share of the type's total, in percent
    pub percentage: f64,
}

/// Group transactions of `kind` by category label
pub fn group_by_category(transactions: &[Transaction], kind: TransactionType) -> Vec<CategoryTotal> {
    let mut buckets: HashMap<&str, (Money, usize)> = HashMap::new();
    let mut grand_total = Money::zero();

    for txn in transactions.iter().filter(|t| t.kind == kind) {
        let entry = buckets
            .entry(txn.category_label())
            .or_insert((Money::zero(), 0));
        entry.0 += txn.amount;
        entry.1 += 1;
        grand_total += txn.amount;
    }

    let mut totals: Vec<CategoryTotal> = buckets
        .into_iter()
        .map(|(category, (total, transaction_count))| CategoryTotal {
            category: category.to_string(),
            total,
            transaction_count,
            percentage: total.percentage_of(grand_total),
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    totals
}

/// The `limit` largest buckets
pub fn top_categories(totals: &[CategoryTotal], limit: usize) -> &[CategoryTotal] {
    &totals[..limit.min(totals.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, TransactionId};
    use crate::reports::summarize;
    use chrono::NaiveDate;

    fn expense(id: i64, cents: i64, category: Option<&str>) -> Transaction {
        let txn = Transaction::new(
            TransactionId::new(id),
            TransactionType::Expense,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        match category {
            Some(name) => txn.with_category(CategoryId::new(id), name),
            None => txn,
        }
    }

    #[test]
    fn test_single_category() {
        let txns = vec![
            Transaction::new(
                TransactionId::new(1),
                TransactionType::Income,
                Money::from_cents(10000),
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            ),
            expense(2, 4000, Some("Food")),
            expense(3, 1000, Some("Food")),
        ];

        let totals = group_by_category(&txns, TransactionType::Expense);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].category, "Food");
        assert_eq!(totals[0].total.cents(), 5000);
        assert_eq!(totals[0].transaction_count, 2);
        assert_eq!(totals[0].percentage, 100.0);
    }

    #[test]
    fn test_empty() {
        assert!(group_by_category(&[], TransactionType::Expense).is_empty());
    }

    #[test]
    fn test_missing_category_goes_to_unknown() {
        let txns = vec![expense(1, 500, None), expense(2, 700, Some("Rent"))];
        let totals = group_by_category(&txns, TransactionType::Expense);
        assert_eq!(totals[0].category, "Rent");
        assert_eq!(totals[1].category, "Unknown");
        assert_eq!(totals[1].total.cents(), 500);
    }

    #[test]
    fn test_unknown_label_shares_bucket() {
        let txns = vec![expense(1, 500, None), expense(2, 300, Some("Unknown"))];
        let totals = group_by_category(&txns, TransactionType::Expense);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].category, "Unknown");
        assert_eq!(totals[0].total.cents(), 800);
        assert_eq!(totals[0].transaction_count, 2);
    }

    #[test]
    fn test_ties_break_by_name() {
        let txns = vec![
            expense(1, 1000, Some("Utilities")),
            expense(2, 1000, Some("Entertainment")),
            expense(3, 3000, Some("Rent")),
            expense(4, 1000, Some("Groceries")),
        ];

        let names: Vec<_> = group_by_category(&txns, TransactionType::Expense)
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(names, vec!["Rent", "Entertainment", "Groceries", "Utilities"]);
    }

    #[test]
    fn test_bucket_totals_equal_summary_total() {
        let txns: Vec<_> = (0..40)
            .map(|i| {
                let label = ["Food", "Rent", "Fun", "Travel"][(i % 4) as usize];
                let category = if i % 7 == 0 { None } else { Some(label) };
                expense(i, i * 91 + 5, category)
            })
            .collect();

        let totals = group_by_category(&txns, TransactionType::Expense);
        let bucket_sum: Money = totals.iter().map(|t| t.total).sum();
        let count: usize = totals.iter().map(|t| t.transaction_count).sum();

        assert_eq!(bucket_sum, summarize(&txns).total_expenses);
        assert_eq!(count, txns.len());
        assert_eq!(totals, group_by_category(&txns, TransactionType::Expense));
    }

    #[test]
    fn test_top_categories() {
        let txns = vec![
            expense(1, 100, Some("A")),
            expense(2, 300, Some("B")),
            expense(3, 200, Some("C")),
        ];
        let totals = group_by_category(&txns, TransactionType::Expense);
        let top = top_categories(&totals, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].category, "B");
        assert_eq!(top_categories(&totals, 10).len(), 3);
    }
}
