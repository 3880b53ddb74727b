//! Shared content store test utilities.

use crumbtrail::database::{Database, DatabaseConfig, Fixture};

use super::fixture_path;

/// Creates a temporary on-disk store loaded with `repository.yaml`.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.db");
    let mut db = Database::open(DatabaseConfig::new(path)).unwrap();
    db.import_fixture(&repository_fixture()).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Parses `tests/fixtures/repository.yaml`.
#[allow(dead_code)]
pub fn repository_fixture() -> Fixture {
    Fixture::load(&fixture_path("repository.yaml")).unwrap()
}
