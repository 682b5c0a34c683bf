//! JSON export functionality

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, Category, Transaction};
use crate::state::AppState;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Complete data set export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
}

impl FullExport {
    /// Snapshot the unfiltered state
    pub fn from_state(state: &AppState) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions: state.transactions().to_vec(),
            categories: state.categories().to_vec(),
            budgets: state.budgets().to_vec(),
        }
    }
}

/// Write any serializable value as pretty JSON
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> BudgetResult<()> {
    serde_json::to_writer_pretty(writer, value).map_err(|e| BudgetError::Export(e.to_string()))
}

/// Export the full data set as JSON
pub fn export_full_json<W: Write>(state: &AppState, writer: &mut W) -> BudgetResult<()> {
    write_json(writer, &FullExport::from_state(state))?;
    writeln!(writer)?;
    Ok(())
}
