//! CLI commands for reports
//!
//! Every report is computed from the transactions passing the filter flags.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{
    format_budget_comparison, format_cashflow, format_category_totals, format_dashboard,
    format_summary, format_trend,
};
use crate::error::BudgetResult;
use crate::export::{emit, render, ExportFormat};
use crate::models::TransactionType;
use crate::reports::{cashflow_by_month, top_categories, trend_by_month_of};
use crate::state::Action;
use crate::storage::Storage;

use super::{month_or_current, parse_kind, FilterArgs};

/// Output flags shared by every report
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Table)]
    pub format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total income, total expenses and balance
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Totals per category for one transaction type
    Categories {
        /// INCOME or EXPENSE
        #[arg(long = "kind", value_name = "TYPE", default_value = "EXPENSE")]
        side: String,
        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Totals per month, oldest first
    Trend {
        /// INCOME or EXPENSE
        #[arg(long = "kind", value_name = "TYPE", default_value = "EXPENSE")]
        side: String,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Income, expenses and net per month
    Cashflow {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Budgeted versus actual per expense category
    Budget {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Everything at once
    Dashboard {
        /// Reference month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// How many recent transactions to list
        #[arg(long)]
        recent: Option<usize>,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        out: OutputArgs,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    let state = storage.load()?;
    let symbol = settings.currency_symbol.as_str();

    let (filter, out) = match &cmd {
        ReportCommands::Summary { filter, out }
        | ReportCommands::Categories { filter, out, .. }
        | ReportCommands::Trend { filter, out, .. }
        | ReportCommands::Cashflow { filter, out }
        | ReportCommands::Budget { filter, out, .. }
        | ReportCommands::Dashboard { filter, out, .. } => (filter, out),
    };
    let state = state.reduce(Action::SetFilter(filter.to_filter(&state)?))?;

    let rendered = match &cmd {
        ReportCommands::Summary { .. } => {
            render(&state.summary(), out.format, |s| format_summary(s, symbol))?
        }

        ReportCommands::Categories { side, top, .. } => {
            let kind = parse_kind(side)?;
            let mut totals = state.by_category(kind);
            if let Some(limit) = top {
                totals = top_categories(&totals, *limit).to_vec();
            }
            let heading = match kind {
                TransactionType::Income => "Income by category",
                TransactionType::Expense => "Expenses by category",
            };
            render(&totals, out.format, |t| {
                format_category_totals(heading, t, symbol)
            })?
        }

        ReportCommands::Trend { side, .. } => {
            let kind = parse_kind(side)?;
            let trend = trend_by_month_of(&state.visible_transactions(), kind);
            let heading = match kind {
                TransactionType::Income => "Income trend",
                TransactionType::Expense => "Expense trend",
            };
            render(&trend, out.format, |t| format_trend(heading, t, symbol))?
        }

        ReportCommands::Cashflow { .. } => {
            let rows = cashflow_by_month(&state.visible_transactions());
            render(&rows, out.format, |r| format_cashflow(r, symbol))?
        }

        ReportCommands::Budget { month, .. } => {
            let month = month_or_current(month.as_deref())?;
            let rows = state.budget_vs_actual(month);
            render(&rows, out.format, |r| {
                format_budget_comparison(month, r, symbol)
            })?
        }

        ReportCommands::Dashboard { month, recent, .. } => {
            let month = month_or_current(month.as_deref())?;
            let dashboard =
                state.dashboard(month, recent.unwrap_or(settings.recent_transactions));
            render(&dashboard, out.format, |d| {
                format_dashboard(d, symbol, &settings.date_format)
            })?
        }
    };

    emit(&rendered, out.output.as_deref())
}
