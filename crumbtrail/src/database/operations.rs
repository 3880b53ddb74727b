//! Content store lookups and fixture import.
//!
//! [`Database`] implements every host collaborator trait, so a store can
//! drive the trail builder directly.

use std::collections::BTreeMap;

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::Serialize;

use crate::classifier::CANONICAL_ROUTE;
use crate::error::{Error, Result};
use crate::host::{AliasResolver, ItemLoader, RouteResolver, TermLoader};
use crate::item::{
    ContentItem, Entity, EntityRef, ForeignEntity, ItemId, Term, ITEM_ENTITY_TYPE,
    TERM_ENTITY_TYPE,
};
use crate::trail::LinkSpec;

use super::connection::Database;
use super::fixture::Fixture;
use super::schema::{
    DELETE_FIELD_VALUES, DELETE_ITEM_FIELDS, DELETE_TRANSLATIONS, INSERT_ALIAS,
    INSERT_FIELD_VALUE, INSERT_FOREIGN_ENTITY, INSERT_ITEM, INSERT_ITEM_FIELD, INSERT_ROUTE,
    INSERT_TERM, INSERT_TRANSLATION, SELECT_ALIAS, SELECT_FIELD_VALUES, SELECT_FOREIGN_ENTITY,
    SELECT_ITEM, SELECT_ITEM_COUNT, SELECT_ITEM_FIELDS, SELECT_ROUTES, SELECT_TERM,
    SELECT_TRANSLATION,
};

/// Counts of rows written by [`Database::import_fixture`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Items written.
    pub items: usize,
    /// Translations written.
    pub translations: usize,
    /// Terms written.
    pub terms: usize,
    /// Non-item entities written.
    pub entities: usize,
    /// Aliases written.
    pub aliases: usize,
    /// Route patterns written.
    pub routes: usize,
}

impl Database {
    /// Writes a fixture in a single transaction.
    ///
    /// Items already in the store are replaced along with their fields and
    /// translations; everything else is upserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture is invalid or any write fails, in
    /// which case nothing is written.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbtrail::database::{Database, Fixture};
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let fixture = Fixture::from_yaml_str("items:\n  - { id: 1, title: Newspapers }\n").unwrap();
    /// let summary = db.import_fixture(&fixture).unwrap();
    /// assert_eq!(summary.items, 1);
    /// assert_eq!(db.item_count().unwrap(), 1);
    /// ```
    pub fn import_fixture(&mut self, fixture: &Fixture) -> Result<ImportSummary> {
        fixture.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut summary = ImportSummary::default();

        for term in &fixture.terms {
            tx.execute(INSERT_TERM, params![term.id, term.vocabulary, term.name])?;
            summary.terms += 1;
        }

        for entity in &fixture.entities {
            tx.execute(
                INSERT_FOREIGN_ENTITY,
                params![
                    entity.entity_ref.entity_type,
                    entity.entity_ref.id,
                    entity.label,
                    entity.path
                ],
            )?;
            summary.entities += 1;
        }

        for fixture_item in &fixture.items {
            let item = fixture_item.to_content_item()?;
            let id = item_key(item.id)?;

            tx.execute(DELETE_FIELD_VALUES, [id])?;
            tx.execute(DELETE_ITEM_FIELDS, [id])?;
            tx.execute(DELETE_TRANSLATIONS, [id])?;
            tx.execute(INSERT_ITEM, params![id, item.langcode, item.title])?;

            for (field, refs) in &item.fields {
                tx.execute(INSERT_ITEM_FIELD, params![id, field])?;
                for (delta, entity_ref) in refs.iter().enumerate() {
                    tx.execute(
                        INSERT_FIELD_VALUE,
                        params![
                            id,
                            field,
                            i64::try_from(delta).unwrap_or(i64::MAX),
                            entity_ref.entity_type,
                            entity_ref.id
                        ],
                    )?;
                }
            }

            for (langcode, title) in &fixture_item.translations {
                tx.execute(INSERT_TRANSLATION, params![id, langcode, title])?;
                summary.translations += 1;
            }
            summary.items += 1;
        }

        for (alias, path) in &fixture.aliases {
            tx.execute(INSERT_ALIAS, params![alias, path])?;
            summary.aliases += 1;
        }

        for (pattern, route_name) in &fixture.routes {
            tx.execute(INSERT_ROUTE, params![pattern, route_name])?;
            summary.routes += 1;
        }

        tx.commit()?;
        log::info!(
            "imported {} items, {} terms, {} entities",
            summary.items,
            summary.terms,
            summary.entities
        );
        Ok(summary)
    }

    /// Number of items in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn item_count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(SELECT_ITEM_COUNT, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Loads an item in its original language.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn get_item(conn: &Connection, id: ItemId) -> Result<Option<ContentItem>> {
        let key = item_key(id)?;
        let row = conn
            .query_row(SELECT_ITEM, [key], |row| {
                Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })
            .optional()?;
        let Some((langcode, title)) = row else {
            return Ok(None);
        };

        let mut fields: BTreeMap<String, Vec<EntityRef>> = BTreeMap::new();
        let mut stmt = conn.prepare(SELECT_ITEM_FIELDS)?;
        for name in stmt.query_map([key], |row| row.get::<_, String>(0))? {
            fields.insert(name?, Vec::new());
        }

        let mut stmt = conn.prepare(SELECT_FIELD_VALUES)?;
        let values = stmt.query_map([key], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        for value in values {
            let (field, entity_type, target_id) = value?;
            fields
                .entry(field)
                .or_default()
                .push(EntityRef::new(entity_type, target_id));
        }

        Ok(Some(ContentItem {
            id,
            langcode,
            title,
            fields,
        }))
    }

    /// Finds the route whose pattern matches `path`.
    ///
    /// Exact patterns win over wildcard patterns; among wildcard patterns
    /// the one with the fewest `%` segments wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn match_route(conn: &Connection, path: &str) -> Result<Option<String>> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let wanted: Vec<&str> = path.trim_end_matches('/').split('/').collect();

        let mut stmt = conn.prepare(SELECT_ROUTES)?;
        let routes = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut best: Option<(usize, String)> = None;
        for route in routes {
            let (pattern, name) = route?;
            let segments: Vec<&str> = pattern.trim_end_matches('/').split('/').collect();
            if segments.len() != wanted.len() {
                continue;
            }

            let mut wildcards = 0;
            let matches = segments.iter().zip(&wanted).all(|(pat, seg)| {
                if pat.starts_with('%') {
                    wildcards += 1;
                    !seg.is_empty()
                } else {
                    pat == seg
                }
            });

            if matches && best.as_ref().map_or(true, |(w, _)| wildcards < *w) {
                best = Some((wildcards, name));
            }
        }

        Ok(best.map(|(_, name)| name))
    }
}

fn item_key(id: ItemId) -> Result<i64> {
    i64::try_from(id.value()).map_err(|e| Error::InvalidItemId {
        value: id.to_string(),
        reason: e.to_string(),
    })
}

impl ItemLoader for Database {
    fn load_item(&self, id: ItemId) -> Result<Option<ContentItem>> {
        Self::get_item(&self.conn, id)
    }

    fn load_translation(&self, item: &ContentItem, langcode: &str) -> Result<ContentItem> {
        let title: Option<String> = self
            .conn
            .query_row(SELECT_TRANSLATION, params![item_key(item.id)?, langcode], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(match title {
            Some(title) => {
                let mut translated = item.clone().with_langcode(langcode);
                translated.title = title;
                translated
            }
            None => item.clone(),
        })
    }

    fn load_entity(&self, entity_ref: &EntityRef) -> Result<Option<Entity>> {
        if entity_ref.entity_type == ITEM_ENTITY_TYPE {
            return match entity_ref.as_item_id() {
                Some(id) => Ok(Self::get_item(&self.conn, id)?.map(Entity::Item)),
                None => Ok(None),
            };
        }

        if entity_ref.entity_type == TERM_ENTITY_TYPE {
            return Ok(self.load_term(&entity_ref.id)?.map(|term| {
                Entity::Foreign(ForeignEntity {
                    entity_ref: entity_ref.clone(),
                    path: Some(format!("/taxonomy/term/{}", term.id)),
                    label: term.name,
                })
            }));
        }

        let row = self
            .conn
            .query_row(
                SELECT_FOREIGN_ENTITY,
                params![entity_ref.entity_type, entity_ref.id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?)),
            )
            .optional()?;

        Ok(row.map(|(label, path)| {
            Entity::Foreign(ForeignEntity {
                entity_ref: entity_ref.clone(),
                label,
                path,
            })
        }))
    }
}

impl TermLoader for Database {
    fn load_term(&self, id: &str) -> Result<Option<Term>> {
        Ok(self
            .conn
            .query_row(SELECT_TERM, [id], |row| {
                Ok(Term {
                    id: row.get(0)?,
                    vocabulary: row.get(1)?,
                    name: row.get(2)?,
                })
            })
            .optional()?)
    }
}

impl RouteResolver for Database {
    fn route_for_path(&self, path: &str) -> Result<Option<String>> {
        Self::match_route(&self.conn, path)
    }

    fn canonical_link_for(&self, item: &ContentItem) -> Result<LinkSpec> {
        Ok(LinkSpec::route(
            item.title.clone(),
            CANONICAL_ROUTE,
            ITEM_ENTITY_TYPE,
            item.id.to_string(),
        ))
    }
}

impl AliasResolver for Database {
    fn path_for_alias(&self, alias: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(SELECT_ALIAS, [alias], |row| row.get(0))
            .optional()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, sample_fixture};

    fn id(n: u64) -> ItemId {
        ItemId::try_from(n).unwrap()
    }

    #[test]
    fn test_import_and_load_item() {
        let db = create_test_database();

        let issue = db.load_item(id(3)).unwrap().unwrap();
        assert_eq!(issue.title, "1912-04-15");
        assert_eq!(issue.first_reference("field_member_of"), Some(&EntityRef::item(id(2))));
        assert!(db.load_item(id(999)).unwrap().is_none());
    }

    #[test]
    fn test_declared_empty_field_survives() {
        let db = create_test_database();
        let newspapers = db.load_item(id(1)).unwrap().unwrap();
        assert!(newspapers.has_field("field_member_of"));
        assert!(newspapers.field("field_member_of").unwrap().is_empty());
    }

    #[test]
    fn test_field_values_keep_delta_order() {
        let db = create_test_database();
        let photo = db.load_item(id(5)).unwrap().unwrap();
        assert_eq!(
            photo.field("field_member_of").unwrap(),
            &[EntityRef::item(id(4)), EntityRef::item(id(1))]
        );
    }

    #[test]
    fn test_translation_fallback() {
        let db = create_test_database();
        let gazette = db.load_item(id(2)).unwrap().unwrap();

        let fr = db.load_translation(&gazette, "fr").unwrap();
        assert_eq!(fr.title, "Gazette quotidienne");
        assert_eq!(fr.langcode, "fr");
        assert_eq!(fr.fields, gazette.fields);

        let de = db.load_translation(&gazette, "de").unwrap();
        assert_eq!(de, gazette);
    }

    #[test]
    fn test_load_entities_of_each_kind() {
        let db = create_test_database();

        let term = db.load_entity(&EntityRef::term("10")).unwrap().unwrap();
        assert_eq!(term.label(), "Collection");

        let media = db.load_entity(&EntityRef::new("media", "7")).unwrap().unwrap();
        assert!(matches!(media, Entity::Foreign(ref f) if f.path.as_deref() == Some("/maps")));

        assert!(db.load_entity(&EntityRef::new("media", "8")).unwrap().is_none());
        assert!(db.load_entity(&EntityRef::new("node", "x")).unwrap().is_none());
    }

    #[test]
    fn test_route_matching() {
        let db = create_test_database();
        assert_eq!(
            db.route_for_path("/collection/1").unwrap().as_deref(),
            Some("view.collection.page")
        );
        assert_eq!(
            db.route_for_path("/search?q=maps").unwrap().as_deref(),
            Some("view.advanced_search.page")
        );
        assert_eq!(
            db.route_for_path("/collection/featured").unwrap().as_deref(),
            Some("view.featured.page")
        );
        assert!(db.route_for_path("/collection").unwrap().is_none());
        assert!(db.route_for_path("/unknown/1").unwrap().is_none());
    }

    #[test]
    fn test_alias_lookup() {
        let db = create_test_database();
        assert_eq!(db.path_for_alias("/maps").unwrap().as_deref(), Some("/node/4"));
        assert!(db.path_for_alias("/nowhere").unwrap().is_none());
    }

    #[test]
    fn test_reimport_replaces_fields() {
        let mut db = create_test_database();
        let fixture = Fixture::from_yaml_str(
            "items:\n  - { id: 3, title: Reissued, fields: { field_member_of: [] } }\n",
        )
        .unwrap();
        db.import_fixture(&fixture).unwrap();

        let issue = db.load_item(id(3)).unwrap().unwrap();
        assert_eq!(issue.title, "Reissued");
        assert!(issue.field("field_member_of").unwrap().is_empty());
        assert_eq!(db.item_count().unwrap(), sample_fixture().items.len());
    }

    #[test]
    fn test_invalid_fixture_writes_nothing() {
        let mut db = Database::open_in_memory().unwrap();
        let fixture = Fixture::from_yaml_str(
            "items:\n  - { id: 1, title: A }\n  - { id: 1, title: B }\n",
        )
        .unwrap();
        assert!(db.import_fixture(&fixture).is_err());
        assert_eq!(db.item_count().unwrap(), 0);
    }
}
