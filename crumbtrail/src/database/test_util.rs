//! Shared helpers for content store unit tests.

use crate::database::{Database, Fixture};

/// A newspaper collection with a paged issue, a map collection reached
/// through an alias and an image in two collections.
pub const SAMPLE_FIXTURE: &str = r#"
terms:
  - { id: "10", vocabulary: islandora_models, name: Collection }
  - { id: "11", vocabulary: islandora_models, name: Paged Content }
  - { id: "12", vocabulary: islandora_models, name: Image }
entities:
  - { entity_type: media, id: "7", label: Map scan, path: /maps }
items:
  - id: 1
    title: Newspapers
    fields: { field_model: ["taxonomy_term:10"], field_member_of: [] }
  - id: 2
    title: Daily Gazette
    fields: { field_model: ["taxonomy_term:10"], field_member_of: [1] }
    translations: { fr: Gazette quotidienne }
  - id: 3
    title: "1912-04-15"
    fields: { field_model: ["taxonomy_term:11"], field_member_of: [2] }
  - id: 4
    title: Maps
    fields: { field_model: ["taxonomy_term:10"], field_member_of: [1] }
  - id: 5
    title: Harbour photograph
    fields: { field_model: ["taxonomy_term:12"], field_member_of: [4, 1] }
  - id: 6
    title: Page 1
    fields: { field_model: ["taxonomy_term:12"], field_part_of: [3] }
aliases:
  /maps: /node/4
routes:
  /node/%node: entity.node.canonical
  /collection/%node: view.collection.page
  /collection/featured: view.featured.page
  /search: view.advanced_search.page
"#;

/// Parses [`SAMPLE_FIXTURE`].
///
/// # Panics
///
/// Panics if the fixture does not parse.
#[must_use]
pub fn sample_fixture() -> Fixture {
    Fixture::from_yaml_str(SAMPLE_FIXTURE).unwrap()
}

/// An in-memory store loaded with [`SAMPLE_FIXTURE`].
///
/// # Panics
///
/// Panics if the store cannot be created or loaded.
#[must_use]
pub fn create_test_database() -> Database {
    let mut db = Database::open_in_memory().unwrap();
    db.import_fixture(&sample_fixture()).unwrap();
    db
}
