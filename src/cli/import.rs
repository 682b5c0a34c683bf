//! CLI command handler for importing API list dumps
//!
//! Each file replaces the matching collection. Files may hold a bare JSON
//! array or a paginated `{count, next, previous, results}` page.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::ingest::{parse_budgets, parse_categories, parse_transactions};
use crate::state::Action;
use crate::storage::Storage;

/// Files to import
#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
pub struct ImportArgs {
    /// Transaction list JSON
    #[arg(long)]
    pub transactions: Option<PathBuf>,

    /// Category list JSON
    #[arg(long)]
    pub categories: Option<PathBuf>,

    /// Budget list JSON
    #[arg(long)]
    pub budgets: Option<PathBuf>,
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, args: ImportArgs) -> BudgetResult<()> {
    let mut state = storage.load()?;

    // Categories first so transaction labels resolve against the new list
    if let Some(path) = &args.categories {
        let categories = parse_categories(&read(path)?)?;
        println!("Imported {} categories from {}", categories.len(), path.display());
        state = state.reduce(Action::LoadCategories(categories))?;
    }

    if let Some(path) = &args.transactions {
        let transactions = parse_transactions(&read(path)?)?;
        println!("Imported {} transactions from {}", transactions.len(), path.display());
        state = state.reduce(Action::LoadTransactions(transactions))?;
    }

    if let Some(path) = &args.budgets {
        let budgets = parse_budgets(&read(path)?)?;
        println!("Imported {} budgets from {}", budgets.len(), path.display());
        state = state.reduce(Action::LoadBudgets(budgets))?;
    }

    storage.save(&state)?;
    info!(
        transactions = state.transactions().len(),
        categories = state.categories().len(),
        budgets = state.budgets().len(),
        "Import complete."
    );
    Ok(())
}

fn read(path: &Path) -> BudgetResult<String> {
    if !path.exists() {
        return Err(BudgetError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }

    std::fs::read_to_string(path)
        .map_err(|e| BudgetError::Import(format!("Failed to read {}: {}", path.display(), e)))
}
