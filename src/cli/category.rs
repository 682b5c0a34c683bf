//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_table;
use crate::error::BudgetResult;
use crate::state::Action;
use crate::storage::Storage;

use super::{parse_kind, resolve_category};

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories
    #[command(alias = "ls")]
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// INCOME or EXPENSE
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,
    },

    /// Delete a category; its transactions keep their label
    #[command(alias = "rm")]
    Delete {
        /// Category name or ID
        category: String,
        /// Disambiguates a name used by both an income and an expense category
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
    },

    /// Create the starter categories that don't exist yet
    Defaults,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> BudgetResult<()> {
    let state = storage.load()?;

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_table(state.categories()));
        }

        CategoryCommands::Add { name, kind } => {
            let kind = parse_kind(&kind)?;
            let state = state.reduce(Action::AddCategory {
                name: name.clone(),
                kind,
            })?;
            storage.save(&state)?;

            if let Some(category) = state.categories().last() {
                println!("Created category: {}", category.name);
                println!("  Type: {}", category.kind);
                println!("  ID: {}", category.id);
            }
        }

        CategoryCommands::Delete { category, kind } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let id = resolve_category(&state, &category, kind)?;
            let state = state.reduce(Action::DeleteCategory(id))?;
            storage.save(&state)?;
            println!("Deleted category: {}", category);
        }

        CategoryCommands::Defaults => {
            let before = state.categories().len();
            let state = state.reduce(Action::CreateDefaultCategories)?;
            storage.save(&state)?;
            println!(
                "Created {} default categories.",
                state.categories().len() - before
            );
        }
    }

    Ok(())
}
