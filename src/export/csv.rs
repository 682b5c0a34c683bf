//! CSV export functionality
//!
//! Every exportable report flattens to one row type; the header comes from
//! the row's field names.

use std::io::Write;

use serde::Serialize;

use crate::error::BudgetResult;
use crate::models::{Money, Transaction};
use crate::reports::{
    BudgetComparison, BudgetProgress, CategoryTotal, Dashboard, MonthlyCashflow, MonthlyTotal,
    Summary,
};

/// A report that flattens to CSV rows
pub trait CsvExport {
    type Row: Serialize;

    fn csv_rows(&self) -> Vec<Self::Row>;
}

/// Write rows with a header line
pub fn write_csv<W: Write, R: Serialize>(writer: &mut W, rows: &[R]) -> BudgetResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// One transaction, flattened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub category: String,
    pub description: String,
    pub amount: Money,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.get(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.as_str(),
            category: txn.category_label().to_string(),
            description: txn.description.clone(),
            amount: txn.amount,
        }
    }
}

/// One labelled figure of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRow {
    pub section: &'static str,
    pub label: String,
    pub amount: Money,
}

impl DashboardRow {
    fn new(section: &'static str, label: impl Into<String>, amount: Money) -> Self {
        Self {
            section,
            label: label.into(),
            amount,
        }
    }
}

impl CsvExport for Summary {
    type Row = Summary;

    fn csv_rows(&self) -> Vec<Summary> {
        vec![*self]
    }
}

impl CsvExport for Vec<CategoryTotal> {
    type Row = CategoryTotal;

    fn csv_rows(&self) -> Vec<CategoryTotal> {
        self.clone()
    }
}

impl CsvExport for Vec<MonthlyTotal> {
    type Row = MonthlyTotal;

    fn csv_rows(&self) -> Vec<MonthlyTotal> {
        self.clone()
    }
}

impl CsvExport for Vec<MonthlyCashflow> {
    type Row = MonthlyCashflow;

    fn csv_rows(&self) -> Vec<MonthlyCashflow> {
        self.clone()
    }
}

impl CsvExport for Vec<BudgetComparison> {
    type Row = BudgetComparison;

    fn csv_rows(&self) -> Vec<BudgetComparison> {
        self.clone()
    }
}

impl CsvExport for Vec<BudgetProgress> {
    type Row = BudgetProgress;

    fn csv_rows(&self) -> Vec<BudgetProgress> {
        self.clone()
    }
}

impl CsvExport for Vec<Transaction> {
    type Row = TransactionRow;

    fn csv_rows(&self) -> Vec<TransactionRow> {
        self.iter().map(TransactionRow::from).collect()
    }
}

impl CsvExport for Dashboard {
    type Row = DashboardRow;

    fn csv_rows(&self) -> Vec<DashboardRow> {
        let mut rows = vec![
            DashboardRow::new("summary", "total_income", self.summary.total_income),
            DashboardRow::new("summary", "total_expenses", self.summary.total_expenses),
            DashboardRow::new("summary", "balance", self.summary.balance),
            DashboardRow::new("month", "income", self.monthly_income),
            DashboardRow::new("month", "expenses", self.monthly_expenses),
        ];
        if let Some(budget) = self.current_month_budget {
            rows.push(DashboardRow::new("month", "budget", budget));
        }
        if let Some(remaining) = self.budget_remaining {
            rows.push(DashboardRow::new("month", "budget_remaining", remaining));
        }

        rows.extend(
            self.expenses_by_category
                .iter()
                .map(|c| DashboardRow::new("expenses_by_category", c.category.clone(), c.total)),
        );
        rows.extend(
            self.income_by_category
                .iter()
                .map(|c| DashboardRow::new("income_by_category", c.category.clone(), c.total)),
        );
        rows.extend(
            self.expense_trend
                .iter()
                .map(|m| DashboardRow::new("expense_trend", m.month.to_string(), m.total)),
        );
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetMonth, CategoryId, TransactionId, TransactionType};
    use crate::reports::group_by_category;
    use chrono::NaiveDate;

    fn expense(id: i64, cents: i64, category: &str) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            TransactionType::Expense,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 5, id as u32).unwrap(),
        )
        .with_category(CategoryId::new(1), category)
        .with_description("lunch, with friends")
    }

    fn to_string<R: Serialize>(rows: &[R]) -> String {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, rows).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_transactions_csv() {
        let txns = vec![expense(1, 1250, "Food")];
        let text = to_string(&txns.csv_rows());
        assert_eq!(
            text,
            "id,date,type,category,description,amount\n\
             1,2024-05-01,EXPENSE,Food,\"lunch, with friends\",12.50\n"
        );
    }

    #[test]
    fn test_category_totals_csv() {
        let totals = group_by_category(&[expense(1, 4000, "Food"), expense(2, 1000, "Food")], TransactionType::Expense);
        let text = to_string(&totals.csv_rows());
        assert_eq!(
            text,
            "category,total,transaction_count,percentage\nFood,50.00,2,100.0\n"
        );
    }

    #[test]
    fn test_dashboard_rows() {
        let may = BudgetMonth::new(2024, 5).unwrap();
        let dash = Dashboard::generate(&[expense(1, 4000, "Food")], &[], &[], may, 10);
        let rows = dash.csv_rows();

        assert!(rows.contains(&DashboardRow::new("summary", "balance", Money::from_cents(-4000))));
        assert!(rows.contains(&DashboardRow::new("expenses_by_category", "Food", Money::from_cents(4000))));
        assert!(rows.contains(&DashboardRow::new("expense_trend", "2024-05", Money::from_cents(4000))));
        assert!(!rows.iter().any(|r| r.label == "budget"));
    }
}
