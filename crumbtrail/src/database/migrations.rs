//! Schema initialization and version checks.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_ALIASES_TABLE, CREATE_FIELD_TARGET_INDEX, CREATE_FIELD_VALUES_TABLE,
    CREATE_FOREIGN_ENTITIES_TABLE, CREATE_ITEMS_TABLE, CREATE_ITEM_FIELDS_TABLE,
    CREATE_METADATA_TABLE, CREATE_ROUTES_TABLE, CREATE_TERMS_TABLE, CREATE_TRANSLATIONS_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Creates every table and records the schema version.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use crumbtrail::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in [
        CREATE_METADATA_TABLE,
        CREATE_ITEMS_TABLE,
        CREATE_TRANSLATIONS_TABLE,
        CREATE_ITEM_FIELDS_TABLE,
        CREATE_FIELD_VALUES_TABLE,
        CREATE_TERMS_TABLE,
        CREATE_FOREIGN_ENTITIES_TABLE,
        CREATE_ALIASES_TABLE,
        CREATE_ROUTES_TABLE,
        CREATE_FIELD_TARGET_INDEX,
    ] {
        conn.execute(statement, [])?;
    }

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    Ok(())
}

/// Reads the schema version, 0 for an uninitialized store.
///
/// # Errors
///
/// Returns an error if the query fails for any reason other than a
/// missing metadata table or row.
pub fn get_schema_version(conn: &Connection) -> Result<u32> {
    let has_metadata: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| row.get::<_, String>(0)) {
        Ok(value) => value.parse::<u32>().map_err(|_| Error::Validation {
            field: "schema_version".into(),
            message: format!("Unreadable schema version '{value}'"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Initializes a fresh store or verifies an existing one.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] when the store was written
/// by a different schema version.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        log::debug!("initializing content store schema v{CURRENT_SCHEMA_VERSION}");
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
