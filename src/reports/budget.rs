//! Budget-vs-actual comparisons and budget progress

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{
    Budget, BudgetMonth, Category, CategoryId, Money, Transaction, TransactionType,
};

/// Planned versus spent for one expense category in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category_id: CategoryId,
    pub category: String,
    /// Budget amount, zero when no budget row exists
    pub budgeted: Money,
    /// Expenses in this category and month
    pub actual: Money,
    /// Budgeted minus actual
    pub remaining: Money,
}

impl BudgetComparison {
    /// Whether spending exceeded the plan
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Actual as a percentage of budgeted; zero when nothing was budgeted
    pub fn percentage_used(&self) -> f64 {
        self.actual.percentage_of(self.budgeted)
    }
}

/// One row per expense category, in category-name order
///
/// `budgeted` comes from the first budget row matching (category, month);
/// `actual` sums the EXPENSE transactions with that category id dated in
/// `month`.
pub fn budget_vs_actual(
    categories: &[Category],
    budgets: &[Budget],
    transactions: &[Transaction],
    month: BudgetMonth,
) -> Vec<BudgetComparison> {
    let mut spent: HashMap<CategoryId, Money> = HashMap::new();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date))
    {
        if let Some(category) = txn.category {
            *spent.entry(category).or_default() += txn.amount;
        }
    }

    let mut expense_categories: Vec<&Category> = categories
        .iter()
        .filter(|c| c.kind == TransactionType::Expense)
        .collect();
    expense_categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    expense_categories
        .into_iter()
        .map(|category| {
            let budgeted = budgets
                .iter()
                .find(|b| b.applies_to(Some(category.id), month))
                .map(|b| b.amount)
                .unwrap_or_default();
            let actual = spent.get(&category.id).copied().unwrap_or_default();

            BudgetComparison {
                category_id: category.id,
                category: category.name.clone(),
                budgeted,
                actual,
                remaining: budgeted - actual,
            }
        })
        .collect()
}

/// Spending against a single budget row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub month: BudgetMonth,
    pub category: Option<CategoryId>,
    pub amount: Money,
    pub actual_expenses: Money,
    pub remaining: Money,
    /// Actual as a percentage of the amount, rounded to 2 places
    pub percentage_used: f64,
}

impl BudgetProgress {
    /// Measure a budget against the expenses of its month
    ///
    /// An overall budget counts every expense in the month; a category budget
    /// counts only that category's.
    pub fn compute(budget: &Budget, transactions: &[Transaction]) -> Self {
        let actual_expenses: Money = transactions
            .iter()
            .filter(|t| t.is_expense() && budget.month.contains(t.date))
            .filter(|t| budget.category.is_none() || t.category == budget.category)
            .map(|t| t.amount)
            .sum();

        Self::from_parts(budget.month, budget.category, budget.amount, actual_expenses)
    }

    fn from_parts(
        month: BudgetMonth,
        category: Option<CategoryId>,
        amount: Money,
        actual_expenses: Money,
    ) -> Self {
        let percentage_used = (actual_expenses.percentage_of(amount) * 100.0).round() / 100.0;

        Self {
            month,
            category,
            amount,
            actual_expenses,
            remaining: amount - actual_expenses,
            percentage_used,
        }
    }

    /// Fraction of the budget used, clamped to [0, 1] for gauge display
    pub fn gauge_fraction(&self) -> f64 {
        if !self.amount.is_positive() {
            return 0.0;
        }
        (self.actual_expenses.as_f64() / self.amount.as_f64()).clamp(0.0, 1.0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// The amount planned for `month` as a whole
///
/// The overall budget row wins; otherwise the month's category budgets are
/// summed; `None` when the month has no budget at all.
pub fn planned_for_month(budgets: &[Budget], month: BudgetMonth) -> Option<Money> {
    if let Some(overall) = budgets.iter().find(|b| b.applies_to(None, month)) {
        return Some(overall.amount);
    }

    let mut scoped = budgets.iter().filter(|b| b.month == month).peekable();
    scoped.peek()?;
    Some(scoped.map(|b| b.amount).sum())
}

/// Progress of the month as a whole, when it has a budget
pub fn month_progress(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: BudgetMonth,
) -> Option<BudgetProgress> {
    let amount = planned_for_month(budgets, month)?;
    let actual: Money = transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date))
        .map(|t| t.amount)
        .sum();
    Some(BudgetProgress::from_parts(month, None, amount, actual))
}
