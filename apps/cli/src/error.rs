//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Command Function → Result<T, CliError>                                │
//! │         │                                                               │
//! │         ├── DbError::Validation ───► exit 2  "error: name is required" │
//! │         ├── DbError::NotFound ─────► exit 3                            │
//! │         ├── DbError (storage) ─────► exit 1  (details logged)          │
//! │         ├── Config / TOML ─────────► exit 78                           │
//! │         └── I/O ───────────────────► exit 74                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The interactive shell prints the message and keeps going instead.

use thiserror::Error;

use stockroom_db::DbError;

/// CLI failure.
#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog operation failed.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Configuration could not be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Terminal or filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error (sysexits-style where one fits).
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Db(DbError::Validation(_)) => 2,
            CliError::Db(DbError::NotFound { .. }) => 3,
            CliError::Db(_) => 1,
            CliError::Config(_) | CliError::Toml(_) => 78,
            CliError::Io(_) => 74,
            CliError::Json(_) => 70,
        }
    }

    /// Message shown to the user.
    ///
    /// Storage failures are logged in full and summarized on screen.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Db(err) if err.is_storage() && !matches!(err, DbError::NotFound { .. }) => {
                tracing::error!(error = %err, "Catalog operation failed");
                "database operation failed (run with STOCKROOM_LOG=debug for details)".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
