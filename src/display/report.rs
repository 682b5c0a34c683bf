//! Report formatting for terminal output
//!
//! Each report renders as plain text: a title, a separator, then aligned
//! columns. Amounts use the configured currency symbol.

use crate::models::{BudgetMonth, Category, Money};
use crate::reports::{
    BudgetComparison, BudgetProgress, CategoryTotal, Dashboard, MonthlyCashflow, MonthlyTotal,
    Summary,
};

const WIDTH: usize = 72;
const BAR_WIDTH: usize = 20;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

fn title(output: &mut String, text: &str) {
    output.push_str(text);
    output.push('\n');
    output.push_str(&separator(WIDTH));
    output.push('\n');
}

/// Income, expenses and balance
pub fn format_summary(summary: &Summary, symbol: &str) -> String {
    let mut output = String::new();
    title(&mut output, "Summary");
    output.push_str(&format!(
        "{:<20} {:>16}\n",
        "Total income:",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>16}\n",
        "Total expenses:",
        summary.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>16}\n",
        "Balance:",
        summary.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>16}\n",
        "Transactions:", summary.transaction_count
    ));
    output
}

/// Category breakdown with a share bar per row
pub fn format_category_totals(heading: &str, totals: &[CategoryTotal], symbol: &str) -> String {
    let mut output = String::new();
    title(&mut output, heading);

    if totals.is_empty() {
        output.push_str("No transactions found.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<24} {:>14} {:>6} {:>7}  {}\n",
        "Category", "Total", "Count", "%", ""
    ));
    for row in totals {
        output.push_str(&format!(
            "{:<24} {:>14} {:>6} {:>7}  {}\n",
            truncate(&row.category, 24),
            row.total.format_with_symbol(symbol),
            row.transaction_count,
            format_percentage(row.percentage),
            format_bar(row.percentage, 100.0, BAR_WIDTH)
        ));
    }

    let total: Money = totals.iter().map(|r| r.total).sum();
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<24} {:>14}\n",
        "Total",
        total.format_with_symbol(symbol)
    ));
    output
}

/// Monthly totals, oldest first, scaled against the largest month
pub fn format_trend(heading: &str, trend: &[MonthlyTotal], symbol: &str) -> String {
    let mut output = String::new();
    title(&mut output, heading);

    if trend.is_empty() {
        output.push_str("No transactions found.\n");
        return output;
    }

    let max = trend
        .iter()
        .map(|m| m.total.as_f64())
        .fold(0.0_f64, f64::max);

    for point in trend {
        output.push_str(&format!(
            "{:<8} {:>14}  {}\n",
            point.month,
            point.total.format_with_symbol(symbol),
            format_bar(point.total.as_f64(), max, BAR_WIDTH * 2)
        ));
    }
    output
}

/// Income, expenses and net per month
pub fn format_cashflow(rows: &[MonthlyCashflow], symbol: &str) -> String {
    let mut output = String::new();
    title(&mut output, "Cash flow");

    if rows.is_empty() {
        output.push_str("No transactions found.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<8} {:>14} {:>14} {:>14}\n",
        "Month", "Income", "Expenses", "Net"
    ));
    for row in rows {
        output.push_str(&format!(
            "{:<8} {:>14} {:>14} {:>14}\n",
            row.month,
            row.income.format_with_symbol(symbol),
            row.expenses.format_with_symbol(symbol),
            row.net.format_with_symbol(symbol)
        ));
    }
    output
}

/// Budgeted versus actual per expense category
pub fn format_budget_comparison(
    month: BudgetMonth,
    rows: &[BudgetComparison],
    symbol: &str,
) -> String {
    let mut output = String::new();
    title(&mut output, &format!("Budget vs actual: {}", month));

    if rows.is_empty() {
        output.push_str("No expense categories.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<24} {:>14} {:>14} {:>14}\n",
        "Category", "Budgeted", "Actual", "Remaining"
    ));
    for row in rows {
        let flag = if row.is_over_budget() { " !" } else { "" };
        output.push_str(&format!(
            "{:<24} {:>14} {:>14} {:>14}{}\n",
            truncate(&row.category, 24),
            row.budgeted.format_with_symbol(symbol),
            row.actual.format_with_symbol(symbol),
            row.remaining.format_with_symbol(symbol),
            flag
        ));
    }
    output
}

/// Progress gauge for each budget row
pub fn format_budget_progress(
    progress: &[BudgetProgress],
    categories: &[Category],
    symbol: &str,
) -> String {
    let mut output = String::new();
    title(&mut output, "Budget progress");

    if progress.is_empty() {
        output.push_str("No budgets set for this month.\n");
        return output;
    }

    for row in progress {
        let scope = match row.category {
            Some(id) => categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string()),
            None => "Overall".to_string(),
        };
        output.push_str(&format!(
            "{} {:<18} {} {:>8}  {} of {} ({} left)\n",
            row.month,
            truncate(&scope, 18),
            format_bar(row.gauge_fraction(), 1.0, BAR_WIDTH),
            format_percentage(row.percentage_used),
            row.actual_expenses.format_with_symbol(symbol),
            row.amount.format_with_symbol(symbol),
            row.remaining.format_with_symbol(symbol)
        ));
    }
    output
}

/// The whole dashboard
pub fn format_dashboard(dashboard: &Dashboard, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();
    title(&mut output, &format!("Dashboard: {}", dashboard.month));

    if dashboard.is_empty() {
        output.push_str("No transactions yet. Add one with 'budget transaction add'.\n");
        return output;
    }

    output.push_str(&format!(
        "Balance {}   Income {}   Expenses {}\n",
        dashboard.summary.balance.format_with_symbol(symbol),
        dashboard.summary.total_income.format_with_symbol(symbol),
        dashboard.summary.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "This month: income {}, expenses {}\n",
        dashboard.monthly_income.format_with_symbol(symbol),
        dashboard.monthly_expenses.format_with_symbol(symbol)
    ));

    match (dashboard.current_month_budget, dashboard.budget_remaining) {
        (Some(budget), Some(remaining)) => {
            let usage = dashboard.budget_usage.unwrap_or_default();
            output.push_str(&format!(
                "Budget {}  {} {}  ({} left)\n",
                budget.format_with_symbol(symbol),
                format_bar(usage.min(100.0), 100.0, BAR_WIDTH),
                format_percentage(usage),
                remaining.format_with_symbol(symbol)
            ));
        }
        _ => output.push_str("No budget set for this month.\n"),
    }
    output.push('\n');

    output.push_str(&format_category_totals(
        "Expenses by category",
        &dashboard.expenses_by_category,
        symbol,
    ));
    output.push('\n');
    output.push_str(&format_category_totals(
        "Income by category",
        &dashboard.income_by_category,
        symbol,
    ));
    output.push('\n');
    output.push_str(&format_trend("Expense trend", &dashboard.expense_trend, symbol));

    if dashboard.budget_comparison.iter().any(|r| !r.budgeted.is_zero()) {
        output.push('\n');
        output.push_str(&format_budget_comparison(
            dashboard.month,
            &dashboard.budget_comparison,
            symbol,
        ));
    }

    output.push('\n');
    title(&mut output, "Recent transactions");
    for txn in &dashboard.recent_transactions {
        let signed = if txn.is_expense() { -txn.amount } else { txn.amount };
        output.push_str(&format!(
            "{:<10} {:<18} {:<24} {:>14}\n",
            txn.date.format(date_format),
            truncate(txn.category_label(), 18),
            truncate(&txn.description, 24),
            signed.format_with_symbol(symbol)
        ));
    }
    output
}
