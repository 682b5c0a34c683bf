//! CLI command for exporting the full data set

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_full_json, export_full_yaml, ExportFormat};
use crate::storage::Storage;

/// Export options
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// json or yaml
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Output file path; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> BudgetResult<()> {
    if !matches!(args.format, ExportFormat::Json | ExportFormat::Yaml) {
        return Err(BudgetError::Export(format!(
            "Full export supports json and yaml, not {:?}",
            args.format
        )));
    }

    let state = storage.load()?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Yaml => export_full_yaml(&state, &mut writer)?,
        _ => export_full_json(&state, &mut writer)?,
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        eprintln!("Exported {} transactions to {}", state.transactions().len(), path.display());
    }
    Ok(())
}
