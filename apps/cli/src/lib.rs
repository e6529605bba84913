//! # Stockroom CLI Library
//!
//! Argument parsing, startup, and dispatch for the `stockroom` binary.
//!
//! ## Module Organization
//! ```text
//! stockroom_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── config.rs       ◄─── flags / env / TOML / defaults
//! ├── commands.rs     ◄─── one-shot subcommands
//! ├── shell.rs        ◄─── interactive screen
//! ├── view.rs         ◄─── table rendering
//! └── error.rs        ◄─── CliError + exit codes
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                             │
//! │  2. Load configuration                                                 │
//! │  3. Initialize logging (stderr, EnvFilter)                             │
//! │  4. Connect to database & run migrations                               │
//! │  5. Open the catalog store (publishes persisted rows)                  │
//! │  6. Run the subcommand                                                 │
//! │  7. Close the pool                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod shell;
pub mod view;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::OutputFormat;
use config::AppConfig;
use error::CliResult;
use stockroom_db::{CatalogStore, Database};

/// Default log filter when neither RUST_LOG nor the config sets one.
const DEFAULT_LOG_FILTER: &str = "warn,stockroom=info,sqlx=warn";

/// Inventory manager over a local product catalog.
#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about)]
pub struct Cli {
    /// Database file (`:memory:` for a throwaway catalog)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: stockroom.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a product; a missing or non-numeric quantity is stored as 0
    Add {
        name: String,
        quantity: Option<String>,
    },
    /// Show products whose name contains TEXT
    Find { text: String },
    /// Remove every product named exactly NAME
    Delete { name: String },
    /// Show all products
    List,
    /// Show one product by id
    Show { id: i64 },
    /// Fill an empty catalog with demo products
    Seed {
        #[arg(short, long, default_value_t = 20)]
        count: usize,
    },
    /// Database diagnostics
    Status,
    /// Interactive inventory screen
    Shell,
}

/// Parses arguments from the process and runs.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.user_message());
            ExitCode::from(err.exit_code())
        }
    }
}

/// Runs a parsed command line.
pub async fn execute(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.config.as_deref())?.with_database_path(cli.db);
    init_tracing(config.log.filter.as_deref());

    let database_path = config.database_path()?;
    let db = Database::new(config.to_db_config()?).await?;
    let store = CatalogStore::open(db).await?;

    info!(path = %database_path.display(), "Catalog ready");

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let result = dispatch(&store, cli.command, &database_path, format).await;
    store.close().await;
    result
}

async fn dispatch(
    store: &CatalogStore,
    command: Command,
    database_path: &Path,
    format: OutputFormat,
) -> CliResult<()> {
    let output = match command {
        Command::Add { name, quantity } => {
            commands::add(store, &name, quantity.as_deref().unwrap_or(""), format).await?
        }
        Command::Find { text } => commands::find(store, &text, format).await?,
        Command::Delete { name } => commands::delete(store, &name, format).await?,
        Command::List => commands::list(store, format).await?,
        Command::Show { id } => commands::show(store, id, format).await?,
        Command::Seed { count } => commands::seed(store, count).await?,
        Command::Status => commands::status(store, database_path, format).await?,
        Command::Shell => return shell::run(store.clone()).await,
    };

    println!("{}", output.trim_end());
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - then `STOCKROOM_LOG` / `[log] filter` from the config
/// - Default: `warn,stockroom=info,sqlx=warn`
///
/// Logs go to stderr; stdout carries command output only.
fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or(DEFAULT_LOG_FILTER)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_optional_quantity() {
        let cli = Cli::parse_from(["stockroom", "--db", ":memory:", "add", "Widget"]);
        assert_eq!(cli.db, Some(PathBuf::from(":memory:")));
        match cli.command {
            Command::Add { name, quantity } => {
                assert_eq!(name, "Widget");
                assert_eq!(quantity, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["stockroom", "list", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Command::List));
    }

    #[tokio::test]
    async fn test_execute_against_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cli.db");
        let db_arg = db_path.to_str().unwrap();

        execute(Cli::parse_from(["stockroom", "--db", db_arg, "add", "Widget", "10"]))
            .await
            .unwrap();
        execute(Cli::parse_from(["stockroom", "--db", db_arg, "add", "Gadget", "x"]))
            .await
            .unwrap();

        let db = Database::new(stockroom_db::DbConfig::new(&db_path)).await.unwrap();
        let products = db.products().list_all().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].quantity, 0);
    }
}
