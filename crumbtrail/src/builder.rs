//! Trail assembly.
//!
//! [`TrailBuilder::applies`] inspects the page context and returns an
//! [`Applicability`] value. The caller hands that value back to
//! [`TrailBuilder::build`], which dispatches on the page kind and assembles
//! the trail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classifier::LinkClassifier;
use crate::config::TrailSettings;
use crate::error::Result;
use crate::host::{Host, PageContextProvider};
use crate::item::{ContentItem, Entity, ItemId, Term, ITEM_ENTITY_TYPE};
use crate::resolver::ReferenceResolver;
use crate::trail::{LinkSpec, LinkTarget, LinkTrail};
use crate::walker::AncestryWalker;

/// Cache context every trail varies by.
pub const ROUTE_CACHE_CONTEXT: &str = "route";

/// Whether and how a page gets a trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Applicability {
    /// The page gets no trail from this builder.
    NotApplicable,
    /// A taxonomy-term listing page.
    TaxonomyTerm {
        /// The listed term.
        term: Term,
    },
    /// A listing or search view.
    Listing {
        /// The view id.
        view_id: String,
    },
    /// A content item page.
    Content {
        /// The page's item.
        item_id: ItemId,
        /// The item declares at least one reference field.
        repository_object: bool,
    },
}

impl Applicability {
    /// Returns `true` unless the page gets no trail.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

/// Builds breadcrumb trails against a host.
///
/// # Examples
///
/// ```
/// use crumbtrail::database::{Database, Fixture};
/// use crumbtrail::{PageContext, TrailBuilder, TrailSettings};
///
/// let mut db = Database::open_in_memory().unwrap();
/// db.import_fixture(&Fixture::from_yaml_str(
///     "items:\n  - { id: 1, title: Newspapers }\n  - { id: 2, title: Gazette, fields: { field_member_of: [1] } }\n",
/// ).unwrap()).unwrap();
///
/// let settings = TrailSettings::default();
/// let builder = TrailBuilder::new(&settings, &db);
/// let page = PageContext::for_node("2");
///
/// let applicability = builder.applies(&page).unwrap();
/// let trail = builder.build(&page, &applicability).unwrap();
/// assert_eq!(trail.labels(), vec!["Home", "Newspapers"]);
/// ```
pub struct TrailBuilder<'a, H: Host> {
    settings: &'a TrailSettings,
    host: &'a H,
}

impl<'a, H: Host> TrailBuilder<'a, H> {
    /// Creates a builder.
    #[must_use]
    pub fn new(settings: &'a TrailSettings, host: &'a H) -> Self {
        Self { settings, host }
    }

    /// Decides whether the page gets a trail.
    ///
    /// # Errors
    ///
    /// Propagates store failures while loading the page's item.
    pub fn applies(&self, context: &dyn PageContextProvider) -> Result<Applicability> {
        if context.is_front_page() {
            return Ok(Applicability::NotApplicable);
        }

        let route = context.route();
        if let Some(ref term) = route.taxonomy_term {
            return Ok(Applicability::TaxonomyTerm { term: term.clone() });
        }
        if let Some(ref view_id) = route.view_id {
            return Ok(Applicability::Listing {
                view_id: view_id.clone(),
            });
        }

        let Some(ref raw) = route.node else {
            return Ok(Applicability::NotApplicable);
        };
        let item_id = match ItemId::parse(raw) {
            Ok(id) => id,
            Err(e) => {
                log::debug!("ignoring node parameter: {e}");
                return Ok(Applicability::NotApplicable);
            }
        };

        match self.host.load_item(item_id)? {
            Some(item) => Ok(Applicability::Content {
                item_id,
                repository_object: self.is_repository_object(&item),
            }),
            None => {
                log::debug!("item {item_id} not found");
                Ok(Applicability::NotApplicable)
            }
        }
    }

    /// Assembles the trail for an applicable page.
    ///
    /// A page that is not applicable gets an empty trail.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub fn build(
        &self,
        context: &dyn PageContextProvider,
        applicability: &Applicability,
    ) -> Result<LinkTrail> {
        let mut trail = LinkTrail::new();
        if !applicability.is_applicable() {
            return Ok(trail);
        }

        trail
            .add_link(LinkSpec::front(self.settings.labels.home.clone()))
            .add_cache_contexts([ROUTE_CACHE_CONTEXT]);

        let resolver =
            ReferenceResolver::new(self.settings, self.host, self.host, context.langcode())?;
        let classifier = LinkClassifier::new(self.settings, self.host, self.host);

        match applicability {
            Applicability::NotApplicable => {}
            Applicability::TaxonomyTerm { term } => {
                trail
                    .add_cacheable_dependency(term)
                    .add_link(LinkSpec::unlinked(term.name.clone()));
            }
            Applicability::Listing { view_id } => {
                self.build_listing(&mut trail, &resolver, &classifier, context, view_id)?;
            }
            Applicability::Content {
                item_id,
                repository_object,
            } => {
                let item = resolver.load_item(*item_id)?;
                if *repository_object {
                    if let Some(ref item) = item {
                        self.reference_trail(&mut trail, &resolver, &classifier, item)?;
                    }
                }

                if self.settings.include_self
                    && !context.is_admin_route()
                    && !context.is_front_page()
                {
                    let title = context
                        .title()
                        .map(str::to_string)
                        .or_else(|| item.map(|i| i.title));
                    if let Some(title) = title {
                        trail.add_link(LinkSpec::unlinked(title));
                    }
                }
            }
        }

        Ok(trail)
    }

    fn is_repository_object(&self, item: &ContentItem) -> bool {
        self.settings
            .reference_fields
            .iter()
            .any(|field| item.has_field(field))
    }

    fn build_listing(
        &self,
        trail: &mut LinkTrail,
        resolver: &ReferenceResolver<'_>,
        classifier: &LinkClassifier<'_>,
        context: &dyn PageContextProvider,
        view_id: &str,
    ) -> Result<()> {
        if self.settings.search_views.iter().any(|v| v == view_id) {
            trail.add_link(LinkSpec::unlinked(
                self.settings.labels.search_results.clone(),
            ));
            return Ok(());
        }

        let path = context.current_path();
        let route = self.host.route_for_path(path)?;

        if let Some(item) = self.filter_item(resolver, path)? {
            self.reference_trail(trail, resolver, classifier, &item)?;
            let link = match route {
                Some(name) => LinkSpec::route(
                    item.title.clone(),
                    name,
                    ITEM_ENTITY_TYPE,
                    item.id.to_string(),
                ),
                None => LinkSpec::unlinked(item.title.clone()),
            };
            trail.add_link(link);
            return Ok(());
        }

        if let Some(title) = context.title() {
            let target = match route {
                Some(name) => LinkTarget::Route {
                    name,
                    params: BTreeMap::new(),
                },
                None => LinkTarget::Unlinked,
            };
            trail.add_link(LinkSpec::new(title, target));
        }
        Ok(())
    }

    /// The last numeric path segment that loads to a repository object.
    fn filter_item(
        &self,
        resolver: &ReferenceResolver<'_>,
        path: &str,
    ) -> Result<Option<ContentItem>> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        for segment in path.rsplit('/') {
            let Ok(id) = ItemId::parse(segment) else {
                continue;
            };
            if let Some(item) = resolver.load_item(id)? {
                if self.is_repository_object(&item) {
                    return Ok(Some(item));
                }
            }
        }
        Ok(None)
    }

    /// Ancestors of `item` as links, ending with its parents: the nearest
    /// one as a top-level link and any others in a link set beneath it.
    fn reference_trail(
        &self,
        trail: &mut LinkTrail,
        resolver: &ReferenceResolver<'_>,
        classifier: &LinkClassifier<'_>,
        item: &ContentItem,
    ) -> Result<()> {
        trail.add_cacheable_dependency(item);

        let chain = AncestryWalker::new(resolver).walk(item)?;
        let mut ancestors = chain.ancestors().to_vec();
        let referenced = resolver.referenced_entities(item)?;
        for entity in &referenced {
            trail.add_cacheable_dependency(entity);
        }

        if chain.truncated && !ancestors.is_empty() {
            trail.add_link(LinkSpec::unlinked(self.settings.labels.ellipsis.clone()));
        }

        let nearest = match ancestors.pop() {
            Some(parent) => Some(Entity::Item(parent)),
            None => match referenced.first() {
                Some(entity @ Entity::Foreign(_)) => Some(
                    resolver
                        .resolve_item(entity)?
                        .map_or_else(|| entity.clone(), Entity::Item),
                ),
                other => other.cloned(),
            },
        };

        for ancestor in &ancestors {
            let link = self.classified_link(trail, classifier, ancestor)?;
            trail.add_cacheable_dependency(ancestor).add_link(link);
        }

        let Some(nearest) = nearest else {
            return Ok(());
        };

        let before = trail.len();
        let link = self.entity_link(trail, classifier, resolver, &nearest)?;
        trail.add_cacheable_dependency(&nearest).add_link(link);
        if trail.len() == before {
            return Ok(());
        }

        let nearest_id = match nearest {
            Entity::Item(ref parent) => Some(parent.id),
            Entity::Foreign(_) => None,
        };
        let nearest_ref = nearest.entity_ref();

        trail.start_link_set()?;
        for entity in &referenced {
            if entity.entity_ref() == nearest_ref
                || Self::resolves_to(resolver, entity, nearest_id)?
            {
                continue;
            }
            let link = self.entity_link(trail, classifier, resolver, entity)?;
            trail.add_sub_link(link)?;
        }

        Ok(())
    }

    fn resolves_to(
        resolver: &ReferenceResolver<'_>,
        entity: &Entity,
        target: Option<ItemId>,
    ) -> Result<bool> {
        let Some(target) = target else {
            return Ok(false);
        };
        Ok(match entity {
            Entity::Item(item) => item.id == target,
            Entity::Foreign(_) => resolver
                .resolve_item(entity)?
                .is_some_and(|item| item.id == target),
        })
    }

    fn classified_link(
        &self,
        trail: &mut LinkTrail,
        classifier: &LinkClassifier<'_>,
        item: &ContentItem,
    ) -> Result<LinkSpec> {
        let (link, term) = classifier.classify_with_term(item)?;
        if let Some(ref term) = term {
            trail.add_cacheable_dependency(term);
        }
        Ok(link)
    }

    /// Links an entity, classifying the content item behind a foreign
    /// entity when its path leads to one.
    fn entity_link(
        &self,
        trail: &mut LinkTrail,
        classifier: &LinkClassifier<'_>,
        resolver: &ReferenceResolver<'_>,
        entity: &Entity,
    ) -> Result<LinkSpec> {
        match entity {
            Entity::Item(item) => self.classified_link(trail, classifier, item),
            Entity::Foreign(_) => match resolver.resolve_item(entity)? {
                Some(item) => {
                    trail.add_cacheable_dependency(&item);
                    self.classified_link(trail, classifier, &item)
                }
                None => classifier.link_for_entity(entity),
            },
        }
    }
}
