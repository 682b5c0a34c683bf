//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, Category};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format budgets as a table, newest month first
pub fn format_budget_table(budgets: &[Budget], categories: &[Category], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut sorted: Vec<&Budget> = budgets.iter().collect();
    sorted.sort_by(|a, b| b.month.cmp(&a.month).then_with(|| a.id.cmp(&b.id)));

    let rows = sorted.into_iter().map(|b| BudgetRow {
        id: b.id.to_string(),
        month: b.month.to_string(),
        category: match b.category {
            Some(id) => categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string()),
            None => "(all)".to_string(),
        },
        amount: b.amount.format_with_symbol(symbol),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, BudgetMonth, CategoryId, Money, TransactionType};

    #[test]
    fn test_table() {
        let may = BudgetMonth::new(2024, 5).unwrap();
        let budgets = vec![
            Budget::new(BudgetId::new(1), may, Money::from_cents(150000)),
            Budget::for_category(BudgetId::new(2), may.next(), CategoryId::new(3), Money::from_cents(20000)),
        ];
        let categories = vec![Category::new(CategoryId::new(3), "Food", TransactionType::Expense)];

        let text = format_budget_table(&budgets, &categories, "$");
        assert!(text.contains("(all)"));
        assert!(text.contains("Food"));
        assert!(text.contains("$1500.00"));
        assert!(text.find("2024-06").unwrap() < text.find("2024-05").unwrap());
    }
}
