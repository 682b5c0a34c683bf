//! Export module for budget-tracker
//!
//! Reports can be written in several formats:
//! - Table: the terminal rendering
//! - JSON / YAML: the full report structure
//! - CSV: one flat row per line item (spreadsheet-compatible)
//!
//! The complete data set can also be exported as JSON or YAML.

pub mod csv;
pub mod json;
pub mod yaml;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};

pub use self::csv::{write_csv, CsvExport, DashboardRow, TransactionRow};
pub use json::{export_full_json, write_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, write_yaml};

/// Output format for reports and listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Human-readable terminal output
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

/// Render a report in `format`; `table` supplies the terminal rendering
pub fn render<R, F>(report: &R, format: ExportFormat, table: F) -> BudgetResult<String>
where
    R: Serialize + CsvExport,
    F: FnOnce(&R) -> String,
{
    match format {
        ExportFormat::Table => Ok(table(report)),
        ExportFormat::Json => {
            let mut buffer = Vec::new();
            write_json(&mut buffer, report)?;
            buffer.push(b'\n');
            into_string(buffer)
        }
        ExportFormat::Yaml => {
            let mut buffer = Vec::new();
            write_yaml(&mut buffer, report)?;
            into_string(buffer)
        }
        ExportFormat::Csv => {
            let mut buffer = Vec::new();
            write_csv(&mut buffer, &report.csv_rows())?;
            into_string(buffer)
        }
    }
}

/// Print to stdout, or write to `output` when given
pub fn emit(rendered: &str, output: Option<&Path>) -> BudgetResult<()> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
            println!("Report written to: {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn into_string(buffer: Vec<u8>) -> BudgetResult<String> {
    String::from_utf8(buffer).map_err(|e| BudgetError::Export(e.to_string()))
}
