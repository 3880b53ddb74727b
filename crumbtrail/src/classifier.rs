//! Link classification.
//!
//! Chooses the link an ancestor renders as from its model classification:
//! collections link to their collection listing, paged content links to its
//! canonical page, and everything else gets the host's canonical link.

use crate::config::{LinkShape, TrailSettings};
use crate::error::Result;
use crate::host::{RouteResolver, TermLoader};
use crate::item::{ContentItem, Entity, Term, ITEM_ENTITY_TYPE, TERM_ENTITY_TYPE};
use crate::trail::{LinkSpec, LinkTarget};

/// Route name of an item's canonical page.
pub const CANONICAL_ROUTE: &str = "entity.node.canonical";

/// Maps classified items to links.
pub struct LinkClassifier<'a> {
    settings: &'a TrailSettings,
    terms: &'a dyn TermLoader,
    routes: &'a dyn RouteResolver,
}

impl<'a> LinkClassifier<'a> {
    /// Creates a classifier.
    #[must_use]
    pub fn new(
        settings: &'a TrailSettings,
        terms: &'a dyn TermLoader,
        routes: &'a dyn RouteResolver,
    ) -> Self {
        Self {
            settings,
            terms,
            routes,
        }
    }

    /// Loads the classification term referenced by the item's model field.
    ///
    /// # Errors
    ///
    /// Propagates term store failures.
    pub fn model_term(&self, item: &ContentItem) -> Result<Option<Term>> {
        match item.first_reference(&self.settings.model_field) {
            Some(entity_ref) if entity_ref.entity_type == TERM_ENTITY_TYPE => {
                self.terms.load_term(&entity_ref.id)
            }
            _ => Ok(None),
        }
    }

    /// Returns the link for an item.
    ///
    /// # Errors
    ///
    /// Propagates term store and routing failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbtrail::classifier::LinkClassifier;
    /// use crumbtrail::database::Database;
    /// use crumbtrail::{ContentItem, ItemId, TrailSettings};
    ///
    /// let db = Database::open_in_memory().unwrap();
    /// let settings = TrailSettings::default();
    /// let classifier = LinkClassifier::new(&settings, &db, &db);
    ///
    /// let item = ContentItem::new(ItemId::try_from(4).unwrap(), "Maps");
    /// let link = classifier.classify(&item).unwrap();
    /// assert_eq!(link.target.route_name(), "entity.node.canonical");
    /// ```
    pub fn classify(&self, item: &ContentItem) -> Result<LinkSpec> {
        Ok(self.classify_with_term(item)?.0)
    }

    /// Returns the link for an item together with the classification term
    /// consulted, so callers can record it as a cache dependency.
    ///
    /// # Errors
    ///
    /// Propagates term store and routing failures.
    pub fn classify_with_term(&self, item: &ContentItem) -> Result<(LinkSpec, Option<Term>)> {
        let term = self.model_term(item)?;
        let shape = term
            .as_ref()
            .and_then(|t| self.settings.model_links.get(&t.name).copied())
            .unwrap_or(LinkShape::Default);

        let link = match shape {
            LinkShape::CollectionView => match self.collection_link(item)? {
                Some(link) => link,
                None => {
                    log::debug!(
                        "{} does not resolve, {} gets its canonical link",
                        self.settings.collection_path,
                        item.id
                    );
                    self.routes.canonical_link_for(item)?
                }
            },
            LinkShape::CanonicalView => LinkSpec::route(
                item.title.clone(),
                CANONICAL_ROUTE,
                ITEM_ENTITY_TYPE,
                item.id.to_string(),
            ),
            LinkShape::Default => self.routes.canonical_link_for(item)?,
        };

        Ok((link, term))
    }

    /// Returns the link for any referenced entity. Items are classified;
    /// other entities link to their own canonical route.
    ///
    /// # Errors
    ///
    /// Propagates term store and routing failures.
    pub fn link_for_entity(&self, entity: &Entity) -> Result<LinkSpec> {
        match entity {
            Entity::Item(item) => self.classify(item),
            Entity::Foreign(foreign) => {
                let entity_type = &foreign.entity_ref.entity_type;
                Ok(LinkSpec::new(
                    foreign.label.clone(),
                    LinkTarget::route_with(
                        format!("entity.{entity_type}.canonical"),
                        entity_type.clone(),
                        foreign.entity_ref.id.clone(),
                    ),
                ))
            }
        }
    }

    fn collection_link(&self, item: &ContentItem) -> Result<Option<LinkSpec>> {
        Ok(self
            .routes
            .route_for_path(&self.settings.collection_path)?
            .map(|route| {
                LinkSpec::route(item.title.clone(), route, ITEM_ENTITY_TYPE, item.id.to_string())
            }))
    }
}
