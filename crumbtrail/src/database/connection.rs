//! Content store connection management.

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A `SQLite` content store.
///
/// # Examples
///
/// ```
/// use crumbtrail::database::Database;
///
/// let db = Database::open_in_memory().unwrap();
/// assert_eq!(db.item_count().unwrap(), 0);
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: Option<DatabaseConfig>,
}

impl Database {
    /// Opens a store file, creating it and its parent directory when
    /// `auto_create` is set, and initializes or verifies the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreNotFound`] if the file is missing and may not
    /// be created, or an error if it cannot be opened, configured or has
    /// an incompatible schema.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use crumbtrail::database::{Database, DatabaseConfig};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/content.db")).unwrap();
    /// ```
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::StoreNotFound { path: config.path });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        if !config.read_only {
            // journal_mode returns a row, so it cannot go through execute_batch
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        }
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;

        if config.read_only {
            let version = super::migrations::get_schema_version(&conn)?;
            if version != super::schema::CURRENT_SCHEMA_VERSION {
                return Err(Error::UnsupportedSchemaVersion {
                    expected: super::schema::CURRENT_SCHEMA_VERSION,
                    found: version,
                });
            }
        } else {
            super::migrations::check_schema_compatibility(&conn)?;
        }

        log::debug!("opened content store {}", config.path.display());
        Ok(Self {
            conn,
            config: Some(config),
        })
    }

    /// Opens an empty in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        super::migrations::initialize_schema(&conn)?;
        Ok(Self { conn, config: None })
    }

    /// Returns the configuration this store was opened with, `None` for
    /// in-memory stores.
    #[must_use]
    pub fn config(&self) -> Option<&DatabaseConfig> {
        self.config.as_ref()
    }

    /// Returns the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the underlying `SQLite` connection mutably, for transactions.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
