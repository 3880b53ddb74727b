//! Collaborator interfaces provided by the host application.
//!
//! The trail builder never touches storage, routing or request state
//! directly. It asks these traits. Lookups that find nothing return
//! `Ok(None)`; an `Err` means the host itself failed and is passed through
//! to the caller unchanged.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::item::{ContentItem, Entity, EntityRef, ItemId, Term};
use crate::trail::LinkSpec;

/// Loads content items and referenced entities.
#[cfg_attr(test, mockall::automock)]
pub trait ItemLoader {
    /// Loads an item in its default language.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be queried.
    fn load_item(&self, id: ItemId) -> Result<Option<ContentItem>>;

    /// Returns the translation of `item` into `langcode`, or a copy of the
    /// item itself when no such translation exists.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be queried.
    fn load_translation(&self, item: &ContentItem, langcode: &str) -> Result<ContentItem>;

    /// Resolves a field reference to an entity.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be queried.
    fn load_entity(&self, entity_ref: &EntityRef) -> Result<Option<Entity>>;
}

/// Loads classification terms.
#[cfg_attr(test, mockall::automock)]
pub trait TermLoader {
    /// Loads a term by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be queried.
    fn load_term(&self, id: &str) -> Result<Option<Term>>;
}

/// Resolves paths to routes and items to their canonical links.
#[cfg_attr(test, mockall::automock)]
pub trait RouteResolver {
    /// Returns the route name serving `path`, if the path is routable.
    ///
    /// # Errors
    ///
    /// Returns an error only if the router cannot be queried.
    fn route_for_path(&self, path: &str) -> Result<Option<String>>;

    /// Returns the host's default link for an item.
    ///
    /// # Errors
    ///
    /// Returns an error only if the router cannot be queried.
    fn canonical_link_for(&self, item: &ContentItem) -> Result<LinkSpec>;
}

/// Resolves human-readable aliases to system paths.
#[cfg_attr(test, mockall::automock)]
pub trait AliasResolver {
    /// Returns the system path behind `alias`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the alias store cannot be queried.
    fn path_for_alias(&self, alias: &str) -> Result<Option<String>>;
}

/// Every lookup the trail builder needs.
pub trait Host: ItemLoader + TermLoader + RouteResolver + AliasResolver {}

impl<T> Host for T where T: ItemLoader + TermLoader + RouteResolver + AliasResolver {}

/// Parameters of the route being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParameters {
    /// Raw `node` parameter, unparsed.
    pub node: Option<String>,
    /// Term of a taxonomy-term listing page.
    pub taxonomy_term: Option<Term>,
    /// Id of a listing or search view.
    pub view_id: Option<String>,
}

/// Request state the host exposes for the current page.
pub trait PageContextProvider {
    /// Route parameters.
    fn route(&self) -> &RouteParameters;

    /// Current system path, e.g. `/node/12/members`.
    fn current_path(&self) -> &str;

    /// Title the host resolved for the page.
    fn title(&self) -> Option<&str>;

    /// Language of the request.
    fn langcode(&self) -> &str;

    /// Whether the route is administrative.
    fn is_admin_route(&self) -> bool;

    /// Whether the page is the site front page.
    fn is_front_page(&self) -> bool;
}

/// Plain-data page context.
///
/// # Examples
///
/// ```
/// use crumbtrail::{PageContext, PageContextProvider};
///
/// let ctx = PageContext::for_node("12").with_title("Page 3").with_langcode("fr");
/// assert_eq!(ctx.route().node.as_deref(), Some("12"));
/// assert_eq!(ctx.current_path(), "/node/12");
/// assert_eq!(ctx.langcode(), "fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    /// Route parameters.
    pub route: RouteParameters,
    /// Current system path.
    pub path: String,
    /// Page title.
    pub title: Option<String>,
    /// Request language.
    pub langcode: String,
    /// Administrative route flag.
    pub admin_route: bool,
    /// Front page flag.
    pub front_page: bool,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            route: RouteParameters::default(),
            path: "/".to_string(),
            title: None,
            langcode: "en".to_string(),
            admin_route: false,
            front_page: false,
        }
    }
}

impl PageContext {
    /// Context of an item page.
    #[must_use]
    pub fn for_node(raw_id: impl Into<String>) -> Self {
        let raw_id = raw_id.into();
        Self {
            path: format!("/node/{raw_id}"),
            route: RouteParameters {
                node: Some(raw_id),
                ..RouteParameters::default()
            },
            ..Self::default()
        }
    }

    /// Context of a taxonomy-term listing page.
    #[must_use]
    pub fn for_term(term: Term) -> Self {
        Self {
            path: format!("/taxonomy/term/{}", term.id),
            route: RouteParameters {
                taxonomy_term: Some(term),
                ..RouteParameters::default()
            },
            ..Self::default()
        }
    }

    /// Context of a listing or search view at `path`.
    #[must_use]
    pub fn for_view(view_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            route: RouteParameters {
                view_id: Some(view_id.into()),
                ..RouteParameters::default()
            },
            ..Self::default()
        }
    }

    /// Context of the site front page.
    #[must_use]
    pub fn front_page() -> Self {
        Self {
            front_page: true,
            ..Self::default()
        }
    }

    /// Sets the page title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the request language.
    #[must_use]
    pub fn with_langcode(mut self, langcode: impl Into<String>) -> Self {
        self.langcode = langcode.into();
        self
    }

    /// Marks the route as administrative.
    #[must_use]
    pub fn admin(mut self) -> Self {
        self.admin_route = true;
        self
    }
}

impl PageContextProvider for PageContext {
    fn route(&self) -> &RouteParameters {
        &self.route
    }

    fn current_path(&self) -> &str {
        &self.path
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn langcode(&self) -> &str {
        &self.langcode
    }

    fn is_admin_route(&self) -> bool {
        self.admin_route
    }

    fn is_front_page(&self) -> bool {
        self.front_page
    }
}
