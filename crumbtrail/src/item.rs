//! Content item types.
//!
//! These types describe the content the host hands to the trail builder:
//! repository items with named reference fields, the non-content entities
//! those fields may point at, and classification terms.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::trail::Cacheable;

/// Entity type name of repository content items.
pub const ITEM_ENTITY_TYPE: &str = "node";

/// Entity type name of taxonomy terms.
pub const TERM_ENTITY_TYPE: &str = "taxonomy_term";

/// A valid content item identifier: non-zero and no larger than
/// `i64::MAX`, the widest integer the content store keeps.
///
/// # Examples
///
/// ```
/// use crumbtrail::ItemId;
///
/// let id = ItemId::try_from(42).unwrap();
/// assert_eq!(id.value(), 42);
/// assert_eq!(ItemId::parse("42").unwrap(), id);
///
/// assert!(ItemId::try_from(0).is_err());
/// assert!(ItemId::parse("issue-3").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ItemId(u64);

impl ItemId {
    /// Returns the underlying numeric identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Parses an identifier from a route parameter or path segment.
    ///
    /// Only plain decimal digits are accepted; signs, whitespace and
    /// trailing text are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a non-zero decimal number.
    pub fn parse(raw: &str) -> Result<Self, InvalidItemIdError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidItemIdError {
                value: raw.to_string(),
                reason: "not a decimal identifier".into(),
            });
        }
        let value = raw.parse::<u64>().map_err(|e| InvalidItemIdError {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;
        Self::try_from(value)
    }
}

impl TryFrom<u64> for ItemId {
    type Error = InvalidItemIdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(InvalidItemIdError {
                value: value.to_string(),
                reason: "item id 0 is invalid".into(),
            })
        } else if i64::try_from(value).is_err() {
            Err(InvalidItemIdError {
                value: value.to_string(),
                reason: format!("exceeds the largest storable id {}", i64::MAX),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when an item identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidItemIdError {
    /// The rejected raw value.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl fmt::Display for InvalidItemIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid item id {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidItemIdError {}

/// A typed reference stored in a field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity type, e.g. `node`, `taxonomy_term`, `media`.
    pub entity_type: String,
    /// Entity identifier within its type.
    pub id: String,
}

impl EntityRef {
    /// Creates a reference to an arbitrary entity.
    #[must_use]
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Creates a reference to a content item.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbtrail::{EntityRef, ItemId};
    ///
    /// let id = ItemId::try_from(9).unwrap();
    /// let r = EntityRef::item(id);
    /// assert_eq!(r.as_item_id(), Some(id));
    /// assert_eq!(r.to_string(), "node:9");
    /// ```
    #[must_use]
    pub fn item(id: ItemId) -> Self {
        Self::new(ITEM_ENTITY_TYPE, id.to_string())
    }

    /// Creates a reference to a taxonomy term.
    #[must_use]
    pub fn term(id: impl Into<String>) -> Self {
        Self::new(TERM_ENTITY_TYPE, id)
    }

    /// Returns the item id when this reference points at a content item.
    #[must_use]
    pub fn as_item_id(&self) -> Option<ItemId> {
        if self.entity_type == ITEM_ENTITY_TYPE {
            ItemId::parse(&self.id).ok()
        } else {
            None
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.id)
    }
}

/// A repository content item in one language.
///
/// `fields` maps a field name to its referenced entities in delta order.
/// A field present with an empty list is declared on the item's type but
/// holds no value.
///
/// # Examples
///
/// ```
/// use crumbtrail::{ContentItem, EntityRef, ItemId};
///
/// let parent = ItemId::try_from(1).unwrap();
/// let item = ContentItem::new(ItemId::try_from(2).unwrap(), "Page 1")
///     .with_field("field_member_of", vec![EntityRef::item(parent)])
///     .with_declared_field("field_part_of");
///
/// assert!(item.has_field("field_part_of"));
/// assert!(item.field("field_part_of").unwrap().is_empty());
/// assert_eq!(item.first_reference("field_member_of"), Some(&EntityRef::item(parent)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Stable identifier shared by every translation.
    pub id: ItemId,
    /// Language of this variant.
    #[serde(default = "default_langcode")]
    pub langcode: String,
    /// Display title.
    pub title: String,
    /// Declared fields and their references.
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<EntityRef>>,
}

fn default_langcode() -> String {
    "en".to_string()
}

impl ContentItem {
    /// Creates an item with no fields in the default language.
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            langcode: default_langcode(),
            title: title.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Sets the language code.
    #[must_use]
    pub fn with_langcode(mut self, langcode: impl Into<String>) -> Self {
        self.langcode = langcode.into();
        self
    }

    /// Declares a field holding the given references.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, refs: Vec<EntityRef>) -> Self {
        self.fields.insert(name.into(), refs);
        self
    }

    /// Declares a field without any value.
    #[must_use]
    pub fn with_declared_field(self, name: impl Into<String>) -> Self {
        self.with_field(name, Vec::new())
    }

    /// Returns `true` if the field is declared, populated or not.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the references held by a declared field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&[EntityRef]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Returns the first reference of a field, if any.
    #[must_use]
    pub fn first_reference(&self, name: &str) -> Option<&EntityRef> {
        self.fields.get(name).and_then(|refs| refs.first())
    }

    /// Returns a reference pointing at this item.
    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::item(self.id)
    }
}

/// A referenced entity that is not a repository item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignEntity {
    /// Type and id of the entity.
    #[serde(flatten)]
    pub entity_ref: EntityRef,
    /// Display label.
    pub label: String,
    /// Canonical path or alias the host renders for this entity.
    #[serde(default)]
    pub path: Option<String>,
}

/// What a field reference resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// A repository content item.
    Item(ContentItem),
    /// Any other entity.
    Foreign(ForeignEntity),
}

impl Entity {
    /// Returns the reference identifying this entity.
    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            Self::Item(item) => item.entity_ref(),
            Self::Foreign(foreign) => foreign.entity_ref.clone(),
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Item(item) => &item.title,
            Self::Foreign(foreign) => &foreign.label,
        }
    }
}

/// A classification term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Term identifier.
    pub id: String,
    /// Vocabulary the term belongs to.
    #[serde(default)]
    pub vocabulary: String,
    /// Term name, e.g. `Collection`.
    pub name: String,
}

impl Cacheable for ContentItem {
    fn cache_tags(&self) -> Vec<String> {
        vec![self.entity_ref().to_string()]
    }
}

impl Cacheable for ForeignEntity {
    fn cache_tags(&self) -> Vec<String> {
        vec![self.entity_ref.to_string()]
    }
}

impl Cacheable for Entity {
    fn cache_tags(&self) -> Vec<String> {
        vec![self.entity_ref().to_string()]
    }
}

impl Cacheable for Term {
    fn cache_tags(&self) -> Vec<String> {
        vec![EntityRef::term(self.id.clone()).to_string()]
    }
}
