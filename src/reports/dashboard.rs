//! Dashboard view model
//!
//! Everything the dashboard shows, derived in one pass from the three
//! collections and a reference month.

use serde::{Deserialize, Serialize};

use crate::filter::most_recent;
use crate::models::{Budget, BudgetMonth, Category, Money, Transaction, TransactionType};

use super::budget::{budget_vs_actual, month_progress, BudgetComparison};
use super::by_category::{group_by_category, CategoryTotal};
use super::summary::{summarize, Summary};
use super::trend::{trend_by_month, MonthlyTotal};

/// Dashboard figures for one reference month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// The reference month
    pub month: BudgetMonth,
    /// Totals over every transaction
    pub summary: Summary,
    /// Income dated in the reference month
    pub monthly_income: Money,
    /// Expenses dated in the reference month
    pub monthly_expenses: Money,
    /// Planned spending for the month, if any budget exists
    pub current_month_budget: Option<Money>,
    /// Budget minus monthly expenses
    pub budget_remaining: Option<Money>,
    /// Monthly expenses as a percentage of the budget
    pub budget_usage: Option<f64>,
    pub income_by_category: Vec<CategoryTotal>,
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Expense totals per month, oldest first
    pub expense_trend: Vec<MonthlyTotal>,
    /// Per-category budget comparison for the reference month
    pub budget_comparison: Vec<BudgetComparison>,
    /// Newest transactions first
    pub recent_transactions: Vec<Transaction>,
}

impl Dashboard {
    /// Build the dashboard
    pub fn generate(
        transactions: &[Transaction],
        categories: &[Category],
        budgets: &[Budget],
        month: BudgetMonth,
        recent_limit: usize,
    ) -> Self {
        let this_month: Vec<Transaction> = transactions
            .iter()
            .filter(|t| month.contains(t.date))
            .cloned()
            .collect();
        let monthly = summarize(&this_month);

        let progress = month_progress(budgets, transactions, month);

        Self {
            month,
            summary: summarize(transactions),
            monthly_income: monthly.total_income,
            monthly_expenses: monthly.total_expenses,
            current_month_budget: progress.as_ref().map(|p| p.amount),
            budget_remaining: progress.as_ref().map(|p| p.remaining),
            budget_usage: progress.as_ref().map(|p| p.percentage_used),
            income_by_category: group_by_category(transactions, TransactionType::Income),
            expenses_by_category: group_by_category(transactions, TransactionType::Expense),
            expense_trend: trend_by_month(transactions),
            budget_comparison: budget_vs_actual(categories, budgets, transactions, month),
            recent_transactions: most_recent(transactions, recent_limit),
        }
    }

    /// Whether there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.summary.transaction_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, CategoryId, TransactionId};
    use chrono::NaiveDate;

    fn may() -> BudgetMonth {
        BudgetMonth::new(2024, 5).unwrap()
    }

    fn txn(id: i64, kind: TransactionType, cents: i64, m: u32, d: u32, cat: (i64, &str)) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            kind,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
        )
        .with_category(CategoryId::new(cat.0), cat.1)
    }

    fn fixture() -> (Vec<Transaction>, Vec<Category>, Vec<Budget>) {
        let txns = vec![
            txn(1, TransactionType::Income, 300000, 4, 1, (1, "Salary")),
            txn(2, TransactionType::Expense, 120000, 4, 2, (3, "Rent")),
            txn(3, TransactionType::Income, 300000, 5, 1, (1, "Salary")),
            txn(4, TransactionType::Expense, 120000, 5, 2, (3, "Rent")),
            txn(5, TransactionType::Expense, 5000, 5, 9, (2, "Food")),
        ];
        let cats = vec![
            Category::new(CategoryId::new(1), "Salary", TransactionType::Income),
            Category::new(CategoryId::new(2), "Food", TransactionType::Expense),
            Category::new(CategoryId::new(3), "Rent", TransactionType::Expense),
        ];
        let budgets = vec![Budget::new(BudgetId::new(1), may(), Money::from_cents(150000))];
        (txns, cats, budgets)
    }

    #[test]
    fn test_generate() {
        let (txns, cats, budgets) = fixture();
        let dash = Dashboard::generate(&txns, &cats, &budgets, may(), 3);

        assert_eq!(dash.summary.total_income.cents(), 600000);
        assert_eq!(dash.summary.total_expenses.cents(), 245000);
        assert_eq!(dash.summary.balance.cents(), 355000);

        assert_eq!(dash.monthly_income.cents(), 300000);
        assert_eq!(dash.monthly_expenses.cents(), 125000);
        assert_eq!(dash.current_month_budget, Some(Money::from_cents(150000)));
        assert_eq!(dash.budget_remaining, Some(Money::from_cents(25000)));
        assert_eq!(dash.budget_usage, Some(83.33));

        assert_eq!(dash.expenses_by_category[0].category, "Rent");
        assert_eq!(dash.income_by_category.len(), 1);
        assert_eq!(dash.expense_trend.len(), 2);
        assert_eq!(dash.budget_comparison.len(), 2);

        let recent: Vec<_> = dash.recent_transactions.iter().map(|t| t.id.get()).collect();
        assert_eq!(recent, vec![5, 4, 3]);
    }

    #[test]
    fn test_without_budget() {
        let (txns, cats, _) = fixture();
        let dash = Dashboard::generate(&txns, &cats, &[], may(), 10);
        assert_eq!(dash.current_month_budget, None);
        assert_eq!(dash.budget_remaining, None);
        assert_eq!(dash.budget_usage, None);
        assert_eq!(dash.recent_transactions.len(), 5);
    }

    #[test]
    fn test_empty() {
        let dash = Dashboard::generate(&[], &[], &[], may(), 10);
        assert!(dash.is_empty());
        assert_eq!(dash.summary, Summary::default());
        assert!(dash.expenses_by_category.is_empty());
        assert!(dash.expense_trend.is_empty());
    }
}
