//! Reference field resolution.
//!
//! Reads the configured reference fields of a content item and turns the
//! stored references into loaded entities, translated into the request
//! language. Referenced entities that are not content items can still lead
//! back to one through their canonical path or, failing that, their alias.

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::config::TrailSettings;
use crate::error::{Error, Result};
use crate::host::{AliasResolver, ItemLoader};
use crate::item::{ContentItem, Entity, ItemId};

/// Resolves reference fields against the host's stores.
pub struct ReferenceResolver<'a> {
    settings: &'a TrailSettings,
    items: &'a dyn ItemLoader,
    aliases: &'a dyn AliasResolver,
    langcode: String,
    item_path: Regex,
}

impl<'a> ReferenceResolver<'a> {
    /// Creates a resolver for one request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the configured item path prefix
    /// cannot be turned into a path pattern.
    pub fn new(
        settings: &'a TrailSettings,
        items: &'a dyn ItemLoader,
        aliases: &'a dyn AliasResolver,
        langcode: impl Into<String>,
    ) -> Result<Self> {
        let pattern = format!(
            r"(?:^|/){}/(\d+)(?:[/?#]|$)",
            regex::escape(&settings.item_path_prefix)
        );
        let item_path = Regex::new(&pattern).map_err(|e| Error::Validation {
            field: "item_path_prefix".into(),
            message: e.to_string(),
        })?;

        Ok(Self {
            settings,
            items,
            aliases,
            langcode: langcode.into(),
            item_path,
        })
    }

    /// Returns the settings this resolver reads.
    #[must_use]
    pub fn settings(&self) -> &TrailSettings {
        self.settings
    }

    /// Returns `true` if the item declares any configured reference field,
    /// populated or not.
    #[must_use]
    pub fn has_reference_field(&self, item: &ContentItem) -> bool {
        self.settings
            .reference_fields
            .iter()
            .any(|field| item.has_field(field))
    }

    /// Collects the entities referenced through the configured fields.
    ///
    /// Fields are visited in configuration order. A field contributes only
    /// when it is declared, non-empty and its first reference loads; it
    /// then contributes every reference that loads. An entity referenced
    /// by two fields appears twice. Items come back translated.
    ///
    /// # Errors
    ///
    /// Propagates store failures from the item loader.
    pub fn referenced_entities(&self, item: &ContentItem) -> Result<Vec<Entity>> {
        let mut entities = Vec::new();

        for field in &self.settings.reference_fields {
            let Some(refs) = item.field(field) else {
                continue;
            };
            let Some((first, rest)) = refs.split_first() else {
                continue;
            };

            let Some(first_entity) = self.items.load_entity(first)? else {
                log::warn!("{field} on {} points at missing {first}", item.id);
                continue;
            };
            entities.push(self.localize(first_entity)?);

            for entity_ref in rest {
                match self.items.load_entity(entity_ref)? {
                    Some(entity) => entities.push(self.localize(entity)?),
                    None => log::warn!("{field} on {} points at missing {entity_ref}", item.id),
                }
            }
        }

        Ok(entities)
    }

    /// Loads an item and translates it into the request language.
    ///
    /// # Errors
    ///
    /// Propagates store failures from the item loader.
    pub fn load_item(&self, id: ItemId) -> Result<Option<ContentItem>> {
        match self.items.load_item(id)? {
            Some(item) => Ok(Some(self.translate(&item)?)),
            None => Ok(None),
        }
    }

    /// Recovers the content item behind a referenced entity.
    ///
    /// Items resolve to themselves. Other entities resolve through their
    /// canonical path when it has the item path shape, otherwise through
    /// the alias store. Anything else yields `None`.
    ///
    /// # Errors
    ///
    /// Propagates store failures from the item loader or alias resolver.
    pub fn resolve_item(&self, entity: &Entity) -> Result<Option<ContentItem>> {
        match entity {
            Entity::Item(item) => Ok(Some(self.translate(item)?)),
            Entity::Foreign(foreign) => {
                let Some(ref path) = foreign.path else {
                    return Ok(None);
                };
                match self.item_id_from_path(path)? {
                    Some(id) => self.load_item(id),
                    None => {
                        log::debug!("{} does not lead to a content item", foreign.entity_ref);
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Extracts an item id from a system path or an alias of one.
    ///
    /// # Errors
    ///
    /// Propagates alias store failures.
    pub fn item_id_from_path(&self, path: &str) -> Result<Option<ItemId>> {
        if let Some(id) = self.match_item_path(path) {
            return Ok(Some(id));
        }

        let alias = percent_decode_str(path).decode_utf8_lossy();
        match self.aliases.path_for_alias(&alias)? {
            Some(system_path) => Ok(self.match_item_path(&system_path)),
            None => Ok(None),
        }
    }

    /// Follows the first reference of a single field to a content item.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn parent_via(&self, item: &ContentItem, field: &str) -> Result<Option<ContentItem>> {
        let Some(entity_ref) = item.first_reference(field) else {
            return Ok(None);
        };
        match self.items.load_entity(entity_ref)? {
            Some(entity) => self.resolve_item(&entity),
            None => {
                log::warn!("{field} on {} points at missing {entity_ref}", item.id);
                Ok(None)
            }
        }
    }

    fn localize(&self, entity: Entity) -> Result<Entity> {
        match entity {
            Entity::Item(item) => Ok(Entity::Item(self.translate(&item)?)),
            foreign @ Entity::Foreign(_) => Ok(foreign),
        }
    }

    fn translate(&self, item: &ContentItem) -> Result<ContentItem> {
        if item.langcode == self.langcode {
            return Ok(item.clone());
        }
        self.items.load_translation(item, &self.langcode)
    }

    fn match_item_path(&self, path: &str) -> Option<ItemId> {
        self.item_path
            .captures(path)
            .and_then(|caps| caps.get(1))
            .and_then(|m| ItemId::parse(m.as_str()).ok())
    }
}
