//! Transaction CLI commands

use std::path::PathBuf;

use clap::Subcommand;
use tracing::debug;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_page};
use crate::error::{BudgetError, BudgetResult};
use crate::export::{emit, render, ExportFormat};
use crate::filter::{sort_transactions, TransactionOrdering};
use crate::models::{Page, TransactionId};
use crate::state::{Action, TransactionDraft, TransactionPatch};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_kind, resolve_category, FilterArgs};

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// INCOME or EXPENSE
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Amount (e.g., "12.50"); must be positive
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List transactions, newest first
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Sort order: -date, date, -amount or amount
        #[arg(long, default_value = "-date", allow_hyphen_values = true)]
        order: String,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Table)]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show one transaction
    Show {
        /// Transaction ID
        id: TransactionId,
    },

    /// Change fields of a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// New type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category name or ID
        #[arg(short, long, conflicts_with = "clear_category")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        clear_category: bool,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: TransactionId,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgetResult<()> {
    let state = storage.load()?;
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let kind = parse_kind(&kind)?;
            let draft = TransactionDraft {
                kind,
                amount: parse_amount(&amount)?,
                description: description.unwrap_or_default(),
                date: match date {
                    Some(d) => parse_date(&d)?,
                    None => chrono::Local::now().date_naive(),
                },
                category: category
                    .as_deref()
                    .map(|c| resolve_category(&state, c, Some(kind)))
                    .transpose()?,
            };

            let state = state.reduce(Action::AddTransaction(draft))?;
            storage.save(&state)?;

            if let Some(txn) = state.transactions().last() {
                println!("Added transaction:");
                print!("{}", format_transaction_details(txn, symbol, date_format));
            }
        }

        TransactionCommands::List {
            filter,
            order,
            page,
            page_size,
            format,
            output,
        } => {
            let ordering = TransactionOrdering::parse(&order).ok_or_else(|| {
                BudgetError::Validation(format!(
                    "Invalid order: {}. Use -date, date, -amount or amount",
                    order
                ))
            })?;
            let filter = filter.to_filter(&state)?;
            let state = state.reduce(Action::SetFilter(filter))?;

            let mut visible = state.visible_transactions();
            sort_transactions(&mut visible, ordering);
            debug!(visible = visible.len(), ?ordering, "Listing transactions.");

            let page_size = page_size.unwrap_or(settings.page_size);
            let listing = Page::slice(&visible, page, page_size);
            let rendered = render(&listing.results, format, |_| {
                format_transaction_page(&listing, page, symbol, date_format)
            })?;
            emit(&rendered, output.as_deref())?;
        }

        TransactionCommands::Show { id } => {
            let txn = state
                .transaction(id)
                .ok_or_else(|| BudgetError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(txn, symbol, date_format));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            clear_category,
            date,
            description,
        } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let category_kind = kind.or_else(|| state.transaction(id).map(|t| t.kind));

            let patch = TransactionPatch {
                kind,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
                date: date.as_deref().map(parse_date).transpose()?,
                category: if clear_category {
                    Some(None)
                } else {
                    category
                        .as_deref()
                        .map(|c| resolve_category(&state, c, category_kind).map(Some))
                        .transpose()?
                },
            };

            let state = state.reduce(Action::UpdateTransaction(id, patch))?;
            storage.save(&state)?;

            if let Some(txn) = state.transaction(id) {
                println!("Updated transaction:");
                print!("{}", format_transaction_details(txn, symbol, date_format));
            }
        }

        TransactionCommands::Delete { id } => {
            let state = state.reduce(Action::DeleteTransaction(id))?;
            storage.save(&state)?;
            println!("Deleted transaction {}", id);
        }
    }

    Ok(())
}
