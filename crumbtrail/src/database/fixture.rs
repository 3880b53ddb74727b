//! YAML content fixtures.
//!
//! A fixture describes a small repository: items with their reference
//! fields, translations, classification terms, non-item entities, path
//! aliases and route patterns. Fixtures are how content gets into a store
//! outside of a host application.
//!
//! ```yaml
//! terms:
//!   - { id: "10", vocabulary: islandora_models, name: Collection }
//! items:
//!   - id: 1
//!     title: Newspapers
//!     fields:
//!       field_model: ["taxonomy_term:10"]
//!   - id: 2
//!     title: Daily Gazette
//!     fields:
//!       field_member_of: [1]
//!     translations: { fr: Gazette quotidienne }
//! routes:
//!   /collection/%node: view.collection.page
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::item::{ContentItem, EntityRef, ForeignEntity, ItemId, Term};

/// A field reference as written in a fixture.
///
/// A bare number is an item id, `type:id` names any entity, and the long
/// form spells both keys out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixtureRef {
    /// `42`
    Item(u64),
    /// `"media:7"`
    Typed(String),
    /// `{ entity_type: media, id: "7" }`
    Full(EntityRef),
}

impl FixtureRef {
    /// Converts to an entity reference.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero item id or a string without a type.
    pub fn to_entity_ref(&self) -> Result<EntityRef> {
        match self {
            Self::Item(id) => Ok(EntityRef::item(ItemId::try_from(*id)?)),
            Self::Typed(raw) => match raw.split_once(':') {
                Some((entity_type, id)) if !entity_type.is_empty() && !id.is_empty() => {
                    Ok(EntityRef::new(entity_type, id))
                }
                _ => Err(Error::Validation {
                    field: "fields".into(),
                    message: format!("Reference '{raw}' is not of the form type:id"),
                }),
            },
            Self::Full(entity_ref) => Ok(entity_ref.clone()),
        }
    }
}

impl fmt::Display for FixtureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "{id}"),
            Self::Typed(raw) => write!(f, "{raw}"),
            Self::Full(entity_ref) => write!(f, "{entity_ref}"),
        }
    }
}

/// One content item in a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureItem {
    /// Item id.
    pub id: ItemId,
    /// Original language.
    #[serde(default = "default_langcode")]
    pub langcode: String,
    /// Title in the original language.
    pub title: String,
    /// Declared fields; an empty list declares the field without a value.
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<FixtureRef>>,
    /// Translated titles by language.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

fn default_langcode() -> String {
    "en".to_string()
}

impl FixtureItem {
    /// Builds the content item in its original language.
    ///
    /// # Errors
    ///
    /// Returns an error if a reference is malformed.
    pub fn to_content_item(&self) -> Result<ContentItem> {
        let mut item = ContentItem::new(self.id, self.title.clone()).with_langcode(&self.langcode);
        for (name, refs) in &self.fields {
            let refs = refs
                .iter()
                .map(FixtureRef::to_entity_ref)
                .collect::<Result<Vec<_>>>()?;
            item = item.with_field(name.clone(), refs);
        }
        Ok(item)
    }
}

/// A repository fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    /// Content items.
    #[serde(default)]
    pub items: Vec<FixtureItem>,
    /// Classification terms.
    #[serde(default)]
    pub terms: Vec<Term>,
    /// Non-item entities.
    #[serde(default)]
    pub entities: Vec<ForeignEntity>,
    /// Alias to system path.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Route pattern to route name.
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
}

impl Fixture {
    /// Parses a fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the file cannot be read, or a
    /// configuration error if it is not a valid fixture.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read fixture: {e}"),
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Checks the fixture for conflicts a store would silently overwrite.
    ///
    /// Dangling references are allowed: trails degrade around them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for item in &self.items {
            if !ids.insert(item.id) {
                return Err(Error::Validation {
                    field: "items".into(),
                    message: format!("Duplicate item id {}", item.id),
                });
            }
            if item.title.trim().is_empty() {
                return Err(Error::Validation {
                    field: "items".into(),
                    message: format!("Item {} has an empty title", item.id),
                });
            }
            if item.translations.contains_key(&item.langcode) {
                return Err(Error::Validation {
                    field: "translations".into(),
                    message: format!(
                        "Item {} translates into its own language '{}'",
                        item.id, item.langcode
                    ),
                });
            }
            item.to_content_item()?;
        }

        let mut term_ids = HashSet::new();
        for term in &self.terms {
            if !term_ids.insert(term.id.as_str()) {
                return Err(Error::Validation {
                    field: "terms".into(),
                    message: format!("Duplicate term id {}", term.id),
                });
            }
        }

        for pattern in self.routes.keys() {
            if !pattern.starts_with('/') {
                return Err(Error::Validation {
                    field: "routes".into(),
                    message: format!("Route pattern '{pattern}' must start with '/'"),
                });
            }
        }

        Ok(())
    }
}
