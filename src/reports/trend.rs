//! Month-bucketed trends
//!
//! Buckets are keyed by `BudgetMonth` and come out in ascending "YYYY-MM"
//! order. Only months that have at least one matching transaction appear.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{BudgetMonth, Money, Transaction, TransactionType};

/// Total for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: BudgetMonth,
    pub total: Money,
}

/// Income, expenses and net for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCashflow {
    pub month: BudgetMonth,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

/// Expense totals per month, oldest first
pub fn trend_by_month(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    trend_by_month_of(transactions, TransactionType::Expense)
}

/// Totals per month for one transaction type, oldest first
pub fn trend_by_month_of(transactions: &[Transaction], kind: TransactionType) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<BudgetMonth, Money> = BTreeMap::new();

    for txn in transactions.iter().filter(|t| t.kind == kind) {
        *buckets.entry(txn.month()).or_default() += txn.amount;
    }

    buckets
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

/// Income and expenses side by side per month, oldest first
pub fn cashflow_by_month(transactions: &[Transaction]) -> Vec<MonthlyCashflow> {
    let mut buckets: BTreeMap<BudgetMonth, (Money, Money)> = BTreeMap::new();

    for txn in transactions {
        let entry = buckets.entry(txn.month()).or_default();
        match txn.kind {
            TransactionType::Income => entry.0 += txn.amount,
            TransactionType::Expense => entry.1 += txn.amount,
        }
    }

    buckets
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyCashflow {
            month,
            income,
            expenses,
            net: income - expenses,
        })
        .collect()
}
