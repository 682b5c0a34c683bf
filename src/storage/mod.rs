//! Storage layer for budget-tracker
//!
//! The three collections live in `data/` as JSON lists in the same shape the
//! API serves them, so loading goes through the ingest layer exactly like an
//! import does. A missing file is an empty collection.

pub mod file_io;

pub use file_io::{read_text, write_json_atomic};

use std::path::Path;

use tracing::debug;

use crate::config::paths::BudgetPaths;
use crate::error::BudgetResult;
use crate::ingest::{parse_budgets, parse_categories, parse_transactions};
use crate::state::AppState;

/// Reads and writes the application state under a data directory
pub struct Storage {
    paths: BudgetPaths,
}

impl Storage {
    /// Create a new Storage instance, creating its directories
    pub fn new(paths: BudgetPaths) -> BudgetResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Load all collections from disk
    pub fn load(&self) -> BudgetResult<AppState> {
        let transactions = load_with(&self.paths.transactions_file(), parse_transactions)?;
        let categories = load_with(&self.paths.categories_file(), parse_categories)?;
        let budgets = load_with(&self.paths.budgets_file(), parse_budgets)?;

        debug!(
            transactions = transactions.len(),
            categories = categories.len(),
            budgets = budgets.len(),
            "Loaded data from {}",
            self.paths.data_dir().display()
        );

        Ok(AppState::with_data(transactions, categories, budgets))
    }

    /// Save all collections to disk
    pub fn save(&self, state: &AppState) -> BudgetResult<()> {
        write_json_atomic(self.paths.transactions_file(), state.transactions())?;
        write_json_atomic(self.paths.categories_file(), state.categories())?;
        write_json_atomic(self.paths.budgets_file(), state.budgets())?;
        debug!("Saved data to {}", self.paths.data_dir().display());
        Ok(())
    }
}

fn load_with<T>(path: &Path, parse: fn(&str) -> BudgetResult<Vec<T>>) -> BudgetResult<Vec<T>> {
    match read_text(path)? {
        Some(text) if !text.trim().is_empty() => parse(&text),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetMonth, Money, TransactionType};
    use crate::state::{Action, TransactionDraft};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> Storage {
        Storage::new(BudgetPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap()
    }

    #[test]
    fn test_empty_directory_loads_empty_state() {
        let temp_dir = TempDir::new().unwrap();
        let state = storage(&temp_dir).load().unwrap();
        assert_eq!(state, AppState::new());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        let state = AppState::new()
            .reduce(Action::CreateDefaultCategories)
            .unwrap();
        let food = state
            .find_category("Groceries", Some(TransactionType::Expense))
            .unwrap()
            .id;
        let state = state
            .reduce(Action::AddTransaction(TransactionDraft {
                kind: TransactionType::Expense,
                amount: Money::from_cents(1234),
                description: "Market".into(),
                date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
                category: Some(food),
            }))
            .unwrap()
            .reduce(Action::SetBudget {
                month: BudgetMonth::new(2024, 5).unwrap(),
                category: None,
                amount: Money::from_cents(50000),
            })
            .unwrap();

        storage.save(&state).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded.transactions(), state.transactions());
        assert_eq!(loaded.categories(), state.categories());
        assert_eq!(loaded.budgets(), state.budgets());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        std::fs::write(storage.paths().budgets_file(), "{not json").unwrap();
        assert!(storage.load().is_err());
    }
}
