//! Budget CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_budget_progress, format_budget_table};
use crate::error::BudgetResult;
use crate::export::{emit, render, ExportFormat};
use crate::models::{BudgetId, TransactionType};
use crate::state::Action;
use crate::storage::Storage;

use super::{month_or_current, parse_amount, parse_month, resolve_category};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the budget for a month, overall or for one expense category
    Set {
        /// Month (YYYY-MM)
        month: String,
        /// Amount (e.g., "1500" or "1500.00")
        amount: String,
        /// Expense category name or ID; omit for the whole month
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List budgets
    #[command(alias = "ls")]
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete a budget
    #[command(alias = "rm")]
    Delete {
        /// Budget ID
        id: BudgetId,
    },

    /// Show spending against each budget of a month
    Progress {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Table)]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> BudgetResult<()> {
    let state = storage.load()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set {
            month,
            amount,
            category,
        } => {
            let month = parse_month(&month)?;
            let category = category
                .as_deref()
                .map(|c| resolve_category(&state, c, Some(TransactionType::Expense)))
                .transpose()?;

            let state = state.reduce(Action::SetBudget {
                month,
                category,
                amount: parse_amount(&amount)?,
            })?;
            storage.save(&state)?;

            if let Some(budget) = state
                .budgets()
                .iter()
                .find(|b| b.applies_to(category, month))
            {
                println!("{} ({})", budget, budget.id);
            }
        }

        BudgetCommands::List { month } => {
            let budgets = match month {
                Some(m) => {
                    let month = parse_month(&m)?;
                    state.budgets_for(month).into_iter().cloned().collect()
                }
                None => state.budgets().to_vec(),
            };
            print!(
                "{}",
                format_budget_table(&budgets, state.categories(), symbol)
            );
        }

        BudgetCommands::Delete { id } => {
            let state = state.reduce(Action::DeleteBudget(id))?;
            storage.save(&state)?;
            println!("Deleted budget {}", id);
        }

        BudgetCommands::Progress {
            month,
            format,
            output,
        } => {
            let month = month_or_current(month.as_deref())?;
            let progress = state.budget_progress(month);
            let rendered = render(&progress, format, |rows| {
                format_budget_progress(rows, state.categories(), symbol)
            })?;
            emit(&rendered, output.as_deref())?;
        }
    }

    Ok(())
}
