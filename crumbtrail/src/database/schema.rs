//! Content store schema definitions and SQL constants.

/// Current schema version, stored in the metadata table.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Key-value metadata, including the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Content items in their original language.
pub const CREATE_ITEMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY NOT NULL,
        langcode TEXT NOT NULL,
        title TEXT NOT NULL
    )";

/// Translated titles keyed by item and language.
pub const CREATE_TRANSLATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS translations (
        item_id INTEGER NOT NULL REFERENCES items(id) ON DELETE CASCADE,
        langcode TEXT NOT NULL,
        title TEXT NOT NULL,
        PRIMARY KEY (item_id, langcode)
    )";

/// Fields declared on each item, populated or not.
pub const CREATE_ITEM_FIELDS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS item_fields (
        item_id INTEGER NOT NULL REFERENCES items(id) ON DELETE CASCADE,
        field_name TEXT NOT NULL,
        PRIMARY KEY (item_id, field_name)
    )";

/// Field references in delta order.
pub const CREATE_FIELD_VALUES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS field_values (
        item_id INTEGER NOT NULL,
        field_name TEXT NOT NULL,
        delta INTEGER NOT NULL,
        target_type TEXT NOT NULL,
        target_id TEXT NOT NULL,
        PRIMARY KEY (item_id, field_name, delta),
        FOREIGN KEY (item_id, field_name)
            REFERENCES item_fields(item_id, field_name) ON DELETE CASCADE
    )";

/// Classification terms.
pub const CREATE_TERMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS terms (
        id TEXT PRIMARY KEY NOT NULL,
        vocabulary TEXT NOT NULL,
        name TEXT NOT NULL
    )";

/// Referenceable entities that are not content items.
pub const CREATE_FOREIGN_ENTITIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS foreign_entities (
        entity_type TEXT NOT NULL,
        id TEXT NOT NULL,
        label TEXT NOT NULL,
        path TEXT,
        PRIMARY KEY (entity_type, id)
    )";

/// Path aliases mapped to system paths.
pub const CREATE_ALIASES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS aliases (
        alias TEXT PRIMARY KEY NOT NULL,
        path TEXT NOT NULL
    )";

/// Route patterns. `%name` segments match any single path segment.
pub const CREATE_ROUTES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS routes (
        pattern TEXT PRIMARY KEY NOT NULL,
        route_name TEXT NOT NULL
    )";

/// Speeds up reverse lookups of members by parent.
pub const CREATE_FIELD_TARGET_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_field_values_target ON field_values(target_type, target_id)";

pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

pub const SELECT_ITEM: &str = "SELECT id, langcode, title FROM items WHERE id = ?";

pub const SELECT_ITEM_FIELDS: &str =
    "SELECT field_name FROM item_fields WHERE item_id = ? ORDER BY field_name";

pub const SELECT_FIELD_VALUES: &str = r"
    SELECT field_name, target_type, target_id FROM field_values
    WHERE item_id = ?
    ORDER BY field_name, delta
";

pub const SELECT_TRANSLATION: &str =
    "SELECT title FROM translations WHERE item_id = ? AND langcode = ?";

pub const SELECT_TERM: &str = "SELECT id, vocabulary, name FROM terms WHERE id = ?";

pub const SELECT_FOREIGN_ENTITY: &str =
    "SELECT label, path FROM foreign_entities WHERE entity_type = ? AND id = ?";

pub const SELECT_ALIAS: &str = "SELECT path FROM aliases WHERE alias = ?";

pub const SELECT_ROUTES: &str = "SELECT pattern, route_name FROM routes ORDER BY pattern";

pub const SELECT_ITEM_COUNT: &str = "SELECT COUNT(*) FROM items";

pub const INSERT_ITEM: &str = "INSERT OR REPLACE INTO items (id, langcode, title) VALUES (?, ?, ?)";

pub const DELETE_ITEM_FIELDS: &str = "DELETE FROM item_fields WHERE item_id = ?";

pub const DELETE_FIELD_VALUES: &str = "DELETE FROM field_values WHERE item_id = ?";

pub const DELETE_TRANSLATIONS: &str = "DELETE FROM translations WHERE item_id = ?";

pub const INSERT_ITEM_FIELD: &str =
    "INSERT OR REPLACE INTO item_fields (item_id, field_name) VALUES (?, ?)";

pub const INSERT_FIELD_VALUE: &str = r"
    INSERT OR REPLACE INTO field_values
    (item_id, field_name, delta, target_type, target_id)
    VALUES (?, ?, ?, ?, ?)
";

pub const INSERT_TRANSLATION: &str =
    "INSERT OR REPLACE INTO translations (item_id, langcode, title) VALUES (?, ?, ?)";

pub const INSERT_TERM: &str = "INSERT OR REPLACE INTO terms (id, vocabulary, name) VALUES (?, ?, ?)";

pub const INSERT_FOREIGN_ENTITY: &str =
    "INSERT OR REPLACE INTO foreign_entities (entity_type, id, label, path) VALUES (?, ?, ?, ?)";

pub const INSERT_ALIAS: &str = "INSERT OR REPLACE INTO aliases (alias, path) VALUES (?, ?)";

pub const INSERT_ROUTE: &str = "INSERT OR REPLACE INTO routes (pattern, route_name) VALUES (?, ?)";
