//! budget-tracker - personal budget tracking from the terminal
//!
//! This library records income and expense transactions against categories,
//! keeps monthly budgets, and derives the reports a budgeting dashboard needs:
//! totals, per-category breakdowns, monthly trends and budget-vs-actual
//! comparisons.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, money)
//! - `ingest`: Tolerant parsing of API list payloads into typed records
//! - `filter`: Transaction filtering and ordering
//! - `state`: Application state and the action reducer
//! - `reports`: Pure aggregations over transactions
//! - `storage`: JSON file storage layer
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV output
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::ingest::parse_transactions;
//! use budget_tracker::reports::summarize;
//!
//! let transactions = parse_transactions(&payload)?;
//! let summary = summarize(&transactions);
//! println!("Balance: {}", summary.balance);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod reports;
pub mod state;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
