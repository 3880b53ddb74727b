//! Content store configuration and path resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the content store inside the data directory.
pub const DATABASE_FILE: &str = "content.db";

/// Environment variable overriding the data directory.
pub const DATA_DIR_VAR: &str = "CRUMBTRAIL_DATA_DIR";

/// Configuration for content store connections.
///
/// # Examples
///
/// ```
/// use crumbtrail::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/content.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a configuration with a 5 second busy timeout that creates
    /// the file on first open.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Opens the store read-only. Read-only stores are never created.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbtrail::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/content.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.crumbtrail`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".crumbtrail"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolves the data directory.
///
/// The resolution order is:
/// 1. `explicit`, if given
/// 2. `$CRUMBTRAIL_DATA_DIR`
/// 3. `~/.crumbtrail`
///
/// # Errors
///
/// Returns an error if the home directory is needed but cannot be
/// determined.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match std::env::var(DATA_DIR_VAR) {
        Ok(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Resolves the content store path inside the data directory.
///
/// # Errors
///
/// See [`resolve_data_dir`].
pub fn resolve_database_path(explicit_data_dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_data_dir(explicit_data_dir)?.join(DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_new() {
        let config = DatabaseConfig::new("/tmp/test.db");
        assert_eq!(config.path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert!(config.auto_create);
        assert!(!config.read_only);
    }

    #[test]
    fn test_config_read_only() {
        let config = DatabaseConfig::new("/tmp/test.db").read_only();
        assert!(config.read_only);
        assert!(!config.auto_create);
    }

    #[test]
    fn test_default_data_dir() {
        if let Ok(dir) = default_data_dir() {
            assert!(dir.ends_with(".crumbtrail"));
        }
    }

    #[test]
    #[serial]
    fn test_resolve_database_path() {
        std::env::set_var(DATA_DIR_VAR, "/custom/data");
        assert_eq!(
            resolve_database_path(None).unwrap(),
            PathBuf::from("/custom/data/content.db")
        );
        assert_eq!(
            resolve_database_path(Some(Path::new("/explicit"))).unwrap(),
            PathBuf::from("/explicit/content.db")
        );
        std::env::remove_var(DATA_DIR_VAR);
    }
}
