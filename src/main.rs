use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use budget_tracker::cli::{
    handle_budget_command, handle_category_command, handle_export_command, handle_import_command,
    handle_report_command, handle_transaction_command, BudgetCommands, CategoryCommands,
    ExportArgs, ImportArgs, ReportCommands, TransactionCommands,
};
use budget_tracker::config::{paths::BudgetPaths, settings::Settings};
use budget_tracker::state::Action;
use budget_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Personal budget tracker",
    long_about = "Track income and expenses by category, set monthly budgets, \
                  and see where the money went: summaries, category breakdowns, \
                  monthly trends and budget-vs-actual reports."
)]
struct Cli {
    /// Data directory (defaults to the platform config directory)
    #[arg(long, global = true, env = "BUDGET_TRACKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with default categories
    Init,

    /// Show current configuration and paths
    Config {
        /// Change a setting (e.g., currency_symbol=€)
        #[arg(long, value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Load API list dumps into the data directory
    Import(ImportArgs),

    /// Export all data as JSON or YAML
    Export(ExportArgs),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BudgetPaths::with_base_dir(dir),
        None => BudgetPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    init_tracing(&settings.log_filter);
    debug!(base_dir = %paths.base_dir().display(), "Resolved data directory.");

    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing budget-tracker at: {}", paths.base_dir().display());
            settings.save(&paths)?;

            let state = storage.load()?;
            let before = state.categories().len();
            let state = state.reduce(Action::CreateDefaultCategories)?;
            storage.save(&state)?;

            println!("Initialization complete!");
            println!(
                "Created {} default categories. Run 'budget category list' to see them.",
                state.categories().len() - before
            );
        }
        Some(Commands::Config { set }) => {
            if !set.is_empty() {
                for assignment in &set {
                    let (key, value) = assignment
                        .split_once('=')
                        .with_context(|| format!("Expected KEY=VALUE, got '{}'", assignment))?;
                    settings.set(key.trim(), value.trim())?;
                }
                settings.save(&paths)?;
            }

            println!("budget-tracker Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  currency_symbol:     {}", settings.currency_symbol);
            println!("  date_format:         {}", settings.date_format);
            println!("  recent_transactions: {}", settings.recent_transactions);
            println!("  page_size:           {}", settings.page_size);
            println!("  log_filter:          {}", settings.log_filter);
        }
        Some(Commands::Import(args)) => handle_import_command(&storage, args)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        None => {
            println!("budget-tracker - personal budget tracking");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget init' to get started.");
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the configured filter
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}
