//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the state reducer and the report layer. Each
//! mutating command loads the data directory, applies one action and saves.

pub mod budget;
pub mod category;
pub mod export;
pub mod import;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportArgs};
pub use import::{handle_import_command, ImportArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;
use clap::Args;

use crate::error::{BudgetError, BudgetResult};
use crate::filter::TransactionFilter;
use crate::models::{BudgetMonth, CategoryId, Money, TransactionType};
use crate::state::AppState;

/// Transaction filter flags shared by listing and report commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only INCOME or EXPENSE transactions
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Only this category (name or ID)
    #[arg(long)]
    pub category: Option<String>,

    /// On or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// On or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Minimum amount
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum amount
    #[arg(long)]
    pub max: Option<String>,

    /// Text to look for in descriptions and category names
    #[arg(long)]
    pub search: Option<String>,

    /// Only this calendar month (YYYY-MM)
    #[arg(long, value_name = "YYYY-MM")]
    pub period: Option<String>,

    /// Only this calendar year
    #[arg(long)]
    pub year: Option<i32>,
}

impl FilterArgs {
    /// Build the filter, resolving the category against `state`
    pub fn to_filter(&self, state: &AppState) -> BudgetResult<TransactionFilter> {
        let kind = self.kind.as_deref().map(parse_kind).transpose()?;

        let mut filter = TransactionFilter {
            kind,
            category: self
                .category
                .as_deref()
                .map(|c| resolve_category(state, c, kind))
                .transpose()?,
            date_from: self.from.as_deref().map(parse_date).transpose()?,
            date_to: self.to.as_deref().map(parse_date).transpose()?,
            amount_min: self.min.as_deref().map(parse_amount).transpose()?,
            amount_max: self.max.as_deref().map(parse_amount).transpose()?,
            description: self.search.clone(),
            year: self.year,
            ..TransactionFilter::default()
        };

        if let Some(period) = self.period.as_deref() {
            filter = filter.in_month(parse_month(period)?);
        }

        Ok(filter)
    }
}

/// Parse "INCOME"/"EXPENSE" in any case
pub fn parse_kind(s: &str) -> BudgetResult<TransactionType> {
    TransactionType::parse(s).ok_or_else(|| {
        BudgetError::Validation(format!("Invalid type: {}. Use INCOME or EXPENSE", s))
    })
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

/// Parse a YYYY-MM month
pub fn parse_month(s: &str) -> BudgetResult<BudgetMonth> {
    BudgetMonth::parse(s).map_err(|e| {
        BudgetError::Validation(format!(
            "Invalid month: {}. Use YYYY-MM (e.g., 2025-01): {}",
            s, e
        ))
    })
}

/// The given month, or the current one
pub fn month_or_current(s: Option<&str>) -> BudgetResult<BudgetMonth> {
    s.map(parse_month)
        .transpose()
        .map(|m| m.unwrap_or_else(BudgetMonth::current))
}

/// Parse a decimal amount such as "12.50" or "$1,200"
pub fn parse_amount(s: &str) -> BudgetResult<Money> {
    Money::parse(s).map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))
}

/// Find a category by name or ID
pub fn resolve_category(
    state: &AppState,
    query: &str,
    kind: Option<TransactionType>,
) -> BudgetResult<CategoryId> {
    state
        .find_category(query, kind)
        .map(|c| c.id)
        .ok_or_else(|| BudgetError::category_not_found(query))
}
