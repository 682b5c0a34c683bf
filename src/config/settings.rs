//! User settings for budget-tracker
//!
//! Display preferences, report defaults and the default log filter.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;

/// User settings for budget-tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many transactions the dashboard lists
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,

    /// Rows per page for `transaction list`
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_transactions() -> usize {
    10
}

fn default_page_size() -> usize {
    20
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_transactions: default_recent_transactions(),
            page_size: default_page_size(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller decides to
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Apply a `key=value` override, as used by `budget config --set`
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), BudgetError> {
        let invalid = |e: std::num::ParseIntError| {
            BudgetError::Config(format!("Invalid value for {}: {}", key, e))
        };

        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => self.date_format = value.to_string(),
            "recent_transactions" => self.recent_transactions = value.parse().map_err(invalid)?,
            "page_size" => {
                let size: usize = value.parse().map_err(invalid)?;
                if size == 0 {
                    return Err(BudgetError::Config("page_size must be at least 1".into()));
                }
                self.page_size = size;
            }
            "log_filter" => self.log_filter = value.to_string(),
            other => {
                return Err(BudgetError::Config(format!("Unknown setting: {}", other)));
            }
        }
        Ok(())
    }
}
