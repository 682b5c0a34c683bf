//! Income / expense / balance totals

use serde::{Deserialize, Serialize};

use crate::models::{Money, Transaction, TransactionType};

/// Totals over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of INCOME amounts
    pub total_income: Money,
    /// Sum of EXPENSE amounts
    pub total_expenses: Money,
    /// Income minus expenses
    pub balance: Money,
    /// Number of transactions summed
    pub transaction_count: usize,
}

impl Summary {
    /// The total for one side of the ledger
    pub fn total_for(&self, kind: TransactionType) -> Money {
        match kind {
            TransactionType::Income => self.total_income,
            TransactionType::Expense => self.total_expenses,
        }
    }
}

/// Sum amounts by type; empty input yields all zeros
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut total_income = Money::zero();
    let mut total_expenses = Money::zero();

    for txn in transactions {
        match txn.kind {
            TransactionType::Income => total_income += txn.amount,
            TransactionType::Expense => total_expenses += txn.amount,
        }
    }

    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transaction_count: transactions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionId;
    use chrono::NaiveDate;

    fn txn(id: i64, kind: TransactionType, cents: i64) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            kind,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
    }

    #[test]
    fn test_empty() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn test_income_and_expenses() {
        let txns = vec![
            txn(1, TransactionType::Income, 10000),
            txn(2, TransactionType::Expense, 4000),
            txn(3, TransactionType::Expense, 1000),
        ];

        let summary = summarize(&txns);
        assert_eq!(summary.total_income.cents(), 10000);
        assert_eq!(summary.total_expenses.cents(), 5000);
        assert_eq!(summary.balance.cents(), 5000);
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.total_for(TransactionType::Expense).cents(), 5000);
    }

    #[test]
    fn test_negative_balance() {
        let txns = vec![
            txn(1, TransactionType::Income, 100),
            txn(2, TransactionType::Expense, 350),
        ];
        assert_eq!(summarize(&txns).balance.cents(), -250);
    }

    #[test]
    fn test_balance_identity_and_idempotence() {
        let txns: Vec<_> = (0..50)
            .map(|i| {
                let kind = if i % 3 == 0 {
                    TransactionType::Income
                } else {
                    TransactionType::Expense
                };
                txn(i, kind, (i * 137 % 9000) + 1)
            })
            .collect();

        let income: Money = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let expenses: Money = txns.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

        let summary = summarize(&txns);
        assert_eq!(summary.balance, income - expenses);
        assert_eq!(summary, summarize(&txns));
    }
}
