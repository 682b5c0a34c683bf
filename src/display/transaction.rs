//! Transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Page, Transaction};

use super::report::truncate;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, symbol: &str, date_format: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format(date_format).to_string(),
            kind: txn.kind.to_string(),
            category: txn.category_label().to_string(),
            description: truncate(&txn.description, 32),
            amount: txn.amount.format_with_symbol(symbol),
        }
    }
}

/// Format transactions as a table
pub fn format_transaction_table(
    transactions: &[Transaction],
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|t| TransactionRow::new(t, symbol, date_format));
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format one page of transactions with a position footer
pub fn format_transaction_page(
    page: &Page<Transaction>,
    number: usize,
    symbol: &str,
    date_format: &str,
) -> String {
    let mut output = format_transaction_table(&page.results, symbol, date_format);
    if page.count > 0 {
        output.push_str(&format!(
            "Page {} ({} transactions total){}\n",
            number,
            page.count,
            match &page.next {
                Some(next) => format!(", next: --page {}", next),
                None => String::new(),
            }
        ));
    }
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Category:    {}\n", txn.category_label()));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}
