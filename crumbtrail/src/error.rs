//! Error types for the crumbtrail library.
//!
//! Lookups that simply find nothing are not errors here: collaborators
//! report them as `Ok(None)` and the trail degrades. The variants below
//! cover misuse of the trail structure, invalid configuration and
//! infrastructure failures that must reach the host.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a crumbtrail error.
///
/// # Examples
///
/// ```
/// use crumbtrail::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the crumbtrail library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid content item identifier was provided.
    #[error("invalid item id {value}: {reason}")]
    InvalidItemId {
        /// The rejected raw value.
        value: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// A sub-link was added while no link set was open.
    #[error("no open link set: call start_link_set after adding a top-level link")]
    NoOpenLinkSet,

    /// A link set was started on a trail without any top-level entry.
    #[error("cannot start a link set on an empty trail")]
    EmptyTrail,

    /// A file path could not be used.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// The reason the path is unusable.
        reason: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration or fixture file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// Serializing a rendered trail failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The content store could not answer a lookup.
    #[error("content store unavailable: {details}")]
    StoreUnavailable {
        /// Details about the failure.
        details: String,
    },

    /// The content store file was not found and auto-creation is disabled.
    #[error("content store not found: {}", path.display())]
    StoreNotFound {
        /// The expected path to the store.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the store.
        found: u32,
    },
}

impl Error {
    /// Returns `true` for failures of the backing infrastructure.
    ///
    /// These are the only errors a trail build lets through; the host is
    /// expected to turn them into a page-level error.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Io(_) | Self::StoreUnavailable { .. } | Self::StoreNotFound { .. }
        )
    }
}

impl From<crate::item::InvalidItemIdError> for Error {
    fn from(err: crate::item::InvalidItemIdError) -> Self {
        Self::InvalidItemId {
            value: err.value,
            reason: err.reason,
        }
    }
}
