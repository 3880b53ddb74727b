//! Utility functions for CLI operations.
//!
//! Configuration loading and content store access shared by the commands.

use crate::error::CliError;
use crumbtrail::database::{resolve_data_dir, DATABASE_FILE};
use crumbtrail::{Config, ConfigBuilder, Database, DatabaseConfig};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// The data directory in effect.
    pub fn data_dir(&self) -> Result<PathBuf, CliError> {
        resolve_data_dir(self.data_dir.as_deref()).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Path of the content store.
    pub fn database_path(&self) -> Result<PathBuf, CliError> {
        Ok(self.data_dir()?.join(DATABASE_FILE))
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `--config` file, or discovered `crumbtrail.yaml` files
/// 3. User config in the data directory
/// 4. Built-in defaults
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_data_dir(&global.data_dir()?);

    if let Some(ref path) = global.config {
        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        builder = builder.with_file(path);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Open the content store.
///
/// A missing store is created only when `create` is set.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the store doesn't exist and may not be created.
pub fn open_database(global: &GlobalOptions, create: bool) -> Result<Database, CliError> {
    let db_path = global.database_path()?;

    if !db_path.exists() && !create {
        return Err(CliError::NoDataDirectory);
    }

    let db_config = if create {
        DatabaseConfig::new(db_path)
    } else {
        DatabaseConfig::new(db_path).read_only()
    };

    Database::open(db_config).map_err(CliError::from)
}
