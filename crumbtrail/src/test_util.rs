//! In-memory host used by unit tests.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::host::{AliasResolver, ItemLoader, RouteResolver, TermLoader};
use crate::item::{ContentItem, Entity, EntityRef, ForeignEntity, ItemId, Term, ITEM_ENTITY_TYPE};
use crate::trail::LinkSpec;

pub(crate) fn id(n: u64) -> ItemId {
    ItemId::try_from(n).unwrap()
}

/// Item `n` titled `title` with `field` pointing at `parents`.
pub(crate) fn item_in(n: u64, title: &str, field: &str, parents: &[u64]) -> ContentItem {
    ContentItem::new(id(n), title).with_field(
        field,
        parents.iter().map(|p| EntityRef::item(id(*p))).collect(),
    )
}

#[derive(Debug, Default)]
pub(crate) struct MemoryHost {
    items: BTreeMap<ItemId, ContentItem>,
    translations: BTreeMap<(ItemId, String), ContentItem>,
    foreign: BTreeMap<EntityRef, ForeignEntity>,
    terms: BTreeMap<String, Term>,
    routes: BTreeMap<String, String>,
    aliases: BTreeMap<String, String>,
}

impl MemoryHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_item(mut self, item: ContentItem) -> Self {
        self.items.insert(item.id, item);
        self
    }

    pub(crate) fn with_translation(mut self, item: ContentItem) -> Self {
        self.translations
            .insert((item.id, item.langcode.clone()), item);
        self
    }

    pub(crate) fn with_foreign(mut self, entity: ForeignEntity) -> Self {
        self.foreign.insert(entity.entity_ref.clone(), entity);
        self
    }

    pub(crate) fn with_term(mut self, id: &str, name: &str) -> Self {
        self.terms.insert(
            id.to_string(),
            Term {
                id: id.to_string(),
                vocabulary: "islandora_models".to_string(),
                name: name.to_string(),
            },
        );
        self
    }

    pub(crate) fn with_route(mut self, path: &str, name: &str) -> Self {
        self.routes.insert(path.to_string(), name.to_string());
        self
    }

    pub(crate) fn with_alias(mut self, alias: &str, path: &str) -> Self {
        self.aliases.insert(alias.to_string(), path.to_string());
        self
    }
}

impl ItemLoader for MemoryHost {
    fn load_item(&self, id: ItemId) -> Result<Option<ContentItem>> {
        Ok(self.items.get(&id).cloned())
    }

    fn load_translation(&self, item: &ContentItem, langcode: &str) -> Result<ContentItem> {
        Ok(self
            .translations
            .get(&(item.id, langcode.to_string()))
            .cloned()
            .unwrap_or_else(|| item.clone()))
    }

    fn load_entity(&self, entity_ref: &EntityRef) -> Result<Option<Entity>> {
        if entity_ref.entity_type == ITEM_ENTITY_TYPE {
            return Ok(entity_ref
                .as_item_id()
                .and_then(|id| self.items.get(&id).cloned())
                .map(Entity::Item));
        }
        Ok(self.foreign.get(entity_ref).cloned().map(Entity::Foreign))
    }
}

impl TermLoader for MemoryHost {
    fn load_term(&self, id: &str) -> Result<Option<Term>> {
        Ok(self.terms.get(id).cloned())
    }
}

impl RouteResolver for MemoryHost {
    fn route_for_path(&self, path: &str) -> Result<Option<String>> {
        Ok(self.routes.get(path).cloned())
    }

    fn canonical_link_for(&self, item: &ContentItem) -> Result<LinkSpec> {
        Ok(LinkSpec::route(
            item.title.clone(),
            "entity.node.canonical",
            "node",
            item.id.to_string(),
        ))
    }
}

impl AliasResolver for MemoryHost {
    fn path_for_alias(&self, alias: &str) -> Result<Option<String>> {
        Ok(self.aliases.get(alias).cloned())
    }
}
