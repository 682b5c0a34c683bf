//! YAML export functionality

use std::io::Write;

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::FullExport;
use crate::state::AppState;

/// Write any serializable value as YAML
pub fn write_yaml<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> BudgetResult<()> {
    serde_yaml::to_writer(writer, value).map_err(|e| BudgetError::Export(e.to_string()))
}

/// Export the full data set as YAML, with a header comment
pub fn export_full_yaml<W: Write>(state: &AppState, writer: &mut W) -> BudgetResult<()> {
    let export = FullExport::from_state(state);

    writeln!(writer, "# budget-tracker data export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    write_yaml(writer, &export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Action;

    #[test]
    fn test_yaml_export() {
        let state = AppState::new()
            .reduce(Action::CreateDefaultCategories)
            .unwrap();

        let mut buffer = Vec::new();
        export_full_yaml(&state, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# budget-tracker data export"));
        assert!(text.contains("name: Groceries"));
        assert!(text.contains("type: EXPENSE"));

        let parsed: FullExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.categories.len(), 12);
    }
}
