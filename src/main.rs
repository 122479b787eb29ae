use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use expenses::cli::{handle_expense_command, ExpenseCommands, LineConfirm};
use expenses::config::{ExpensePaths, Settings};
use expenses::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Personal expense tracker backed by a local SQLite file",
    long_about = "Record expenses with a date, category, amount and description. \
                  Run without a command to open the interactive table, or use the \
                  subcommands to script the same operations."
)]
struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true, env = "EXPENSES_DATABASE", value_name = "PATH")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Create the data directory, settings file and database
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let database = cli
        .database
        .unwrap_or_else(|| paths.database_file(&settings.database_file));

    match cli.command {
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Database file:  {}", database.display());
            println!();
            println!("Settings:");
            println!("  Date format: {}", settings.date_format);
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            let storage = open_storage(&database);
            println!("Settings written to {}", paths.settings_file().display());
            if let Some(path) = storage.path() {
                println!("Expenses stored in {}", path.display());
            }
            println!("{} expense(s) recorded", storage.expenses().count()?);
        }
        Some(Commands::Expense(cmd)) => {
            let storage = open_storage(&database);
            let mut confirm = LineConfirm::stdio();
            handle_expense_command(&storage, &settings, cmd, &mut confirm)?;
        }
        None | Some(Commands::Tui) => {
            let storage = open_storage(&database);
            expenses::tui::run_tui(&storage, &settings)?;
        }
    }

    Ok(())
}

/// Open the database, exiting with status 1 on failure
fn open_storage(path: &Path) -> Storage {
    match Storage::open(path) {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Could not open your database: {}", e);
            std::process::exit(1);
        }
    }
}
