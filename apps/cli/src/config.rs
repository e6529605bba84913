//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --db ./inventory.db                                                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     STOCKROOM_DB_PATH=./inventory.db                                   │
//! │     STOCKROOM_LOG=debug                                                │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or stockroom.toml in the platform config dir        │
//! │     ~/.config/stockroom/stockroom.toml (Linux)                         │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     stockroom.db in the platform data dir                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/var/lib/stockroom/stockroom.db"   # or ":memory:"
//! max_connections = 5
//!
//! [log]
//! filter = "info,sqlx=warn"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CliError, CliResult};
use stockroom_db::DbConfig;

/// Environment variable overriding the database path.
pub const ENV_DB_PATH: &str = "STOCKROOM_DB_PATH";

/// Environment variable overriding the log filter.
pub const ENV_LOG: &str = "STOCKROOM_LOG";

const CONFIG_FILE_NAME: &str = "stockroom.toml";
const DB_FILE_NAME: &str = "stockroom.db";

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// Database file. `None` means the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSection {
    fn default() -> Self {
        DatabaseSection {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSection {
    /// `tracing_subscriber::EnvFilter` directives.
    #[serde(default)]
    pub filter: Option<String>,
}

// =============================================================================
// App Config
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSection,

    #[serde(default)]
    pub log: LogSection,
}

impl AppConfig {
    /// Loads configuration from a file and the process environment.
    ///
    /// An explicit `config_path` must exist. The default location is
    /// optional: a missing file just means defaults.
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => AppConfig::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => AppConfig::from_file(&path)?,
                _ => AppConfig::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        debug!(path = %path.display(), "Loading config file");

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Applies `STOCKROOM_*` overrides using the given variable lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            debug!(path = %path, "Database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup(ENV_LOG).filter(|f| !f.trim().is_empty()) {
            self.log.filter = Some(filter);
        }
    }

    /// Applies the `--db` flag.
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database.path = Some(path);
        }
        self
    }

    /// Checks values that TOML can express but the pool can't use.
    pub fn validate(&self) -> CliResult<()> {
        if self.database.max_connections == 0 {
            return Err(CliError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolves the database path, falling back to the platform data dir.
    ///
    /// The data directory is created when it doesn't exist yet.
    pub fn database_path(&self) -> CliResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or_else(|| {
            CliError::Config("could not determine the data directory; pass --db".to_string())
        })?;

        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DB_FILE_NAME))
    }

    /// Builds the pool configuration.
    pub fn to_db_config(&self) -> CliResult<DbConfig> {
        let config = DbConfig::new(self.database_path()?);

        if config.is_in_memory() {
            return Ok(DbConfig::in_memory());
        }

        Ok(config.max_connections(self.database.max_connections))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "stockroom", "stockroom")
}

/// Returns the platform default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

// =============================================================================
// Unit Tests
// =============================================================================
