//! Display formatting for terminal output
//!
//! Lists render as tables; reports render as aligned text with simple bar
//! charts.

pub mod budget;
pub mod category;
pub mod report;
pub mod transaction;

pub use budget::format_budget_table;
pub use category::format_category_table;
pub use report::{
    format_budget_comparison, format_budget_progress, format_cashflow, format_category_totals, format_dashboard,
    format_summary, format_trend,
};
pub use transaction::{format_transaction_details, format_transaction_page, format_transaction_table};
