//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, TransactionType};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: TransactionType,
}

/// Format categories as a table, income first, then by name
pub fn format_category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories. Run 'budget category defaults' to create the starter set.\n"
            .to_string();
    }

    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));

    let rows = sorted.into_iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        kind: c.kind,
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;

    #[test]
    fn test_table_orders_income_first() {
        let categories = vec![
            Category::new(CategoryId::new(1), "Rent", TransactionType::Expense),
            Category::new(CategoryId::new(2), "Salary", TransactionType::Income),
        ];
        let text = format_category_table(&categories);
        let salary = text.find("Salary").unwrap();
        let rent = text.find("Rent").unwrap();
        assert!(salary < rent);
        assert!(text.contains("cat-2"));
    }

    #[test]
    fn test_empty() {
        assert!(format_category_table(&[]).contains("budget category defaults"));
    }
}
