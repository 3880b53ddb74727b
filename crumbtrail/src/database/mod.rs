//! `SQLite` content store.
//!
//! Persists content items, their reference fields, translations, terms,
//! aliases and route patterns, and serves them back through the host
//! collaborator traits so trails can be built outside a host application.
//!
//! # Examples
//!
//! ```
//! use crumbtrail::database::{Database, Fixture};
//! use crumbtrail::{ItemId, ItemLoader};
//!
//! let mut db = Database::open_in_memory().unwrap();
//! let fixture = Fixture::from_yaml_str(
//!     "items:\n  - { id: 1, title: Newspapers }\n  - { id: 2, title: Gazette, fields: { field_member_of: [1] } }\n",
//! )
//! .unwrap();
//! db.import_fixture(&fixture).unwrap();
//!
//! let gazette = db.load_item(ItemId::try_from(2).unwrap()).unwrap().unwrap();
//! assert_eq!(gazette.title, "Gazette");
//! ```

mod config;
mod connection;
mod fixture;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE,
    DATA_DIR_VAR,
};
pub use connection::Database;
pub use fixture::{Fixture, FixtureItem, FixtureRef};
pub use operations::ImportSummary;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
