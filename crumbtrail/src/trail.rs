//! Breadcrumb trail structure.
//!
//! A [`LinkTrail`] is an ordered list of top-level links. Any top-level link
//! may carry a link set: a list of sibling links shown beneath it (for
//! example the other collections an item is a member of). The trail also
//! accumulates the cache metadata the host needs to invalidate rendered
//! output when a consulted entity changes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Route name of the site front page.
pub const FRONT_ROUTE: &str = "<front>";

/// Where a breadcrumb link points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkTarget {
    /// The site front page.
    Front,
    /// A label without a link.
    Unlinked,
    /// A named host route with parameters.
    Route {
        /// Route name, e.g. `entity.node.canonical`.
        name: String,
        /// Route parameters.
        #[serde(default)]
        params: BTreeMap<String, String>,
    },
}

impl LinkTarget {
    /// Builds a route target with a single parameter.
    #[must_use]
    pub fn route_with(name: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = BTreeMap::new();
        params.insert(key.into(), value.into());
        Self::Route {
            name: name.into(),
            params,
        }
    }

    /// Returns the route name, using `<front>` and `<none>` for the
    /// special targets.
    #[must_use]
    pub fn route_name(&self) -> &str {
        match self {
            Self::Front => FRONT_ROUTE,
            Self::Unlinked => "<none>",
            Self::Route { name, .. } => name,
        }
    }
}

/// A single breadcrumb link.
///
/// # Examples
///
/// ```
/// use crumbtrail::{LinkSpec, LinkTarget};
///
/// let link = LinkSpec::route("Issue 4", "entity.node.canonical", "node", "4");
/// assert_eq!(link.target.route_name(), "entity.node.canonical");
///
/// let label = LinkSpec::unlinked("Search Results");
/// assert_eq!(label.target, LinkTarget::Unlinked);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    /// Display label.
    pub label: String,
    /// Link target.
    pub target: LinkTarget,
}

impl LinkSpec {
    /// Creates a link.
    #[must_use]
    pub fn new(label: impl Into<String>, target: LinkTarget) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }

    /// Creates a link to the front page.
    #[must_use]
    pub fn front(label: impl Into<String>) -> Self {
        Self::new(label, LinkTarget::Front)
    }

    /// Creates a label without a link.
    #[must_use]
    pub fn unlinked(label: impl Into<String>) -> Self {
        Self::new(label, LinkTarget::Unlinked)
    }

    /// Creates a link to a route with one parameter.
    #[must_use]
    pub fn route(
        label: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(label, LinkTarget::route_with(name, key, value))
    }

    fn has_label(&self) -> bool {
        !self.label.trim().is_empty()
    }
}

/// How long rendered output may be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaxAge {
    /// Cache until invalidated by a tag.
    #[default]
    Permanent,
    /// Cache for at most this many seconds (0 disables caching).
    Seconds(u32),
}

impl MaxAge {
    /// Returns the stricter of two ages.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbtrail::MaxAge;
    ///
    /// assert_eq!(MaxAge::Permanent.min(MaxAge::Seconds(60)), MaxAge::Seconds(60));
    /// assert_eq!(MaxAge::Seconds(10).min(MaxAge::Seconds(60)), MaxAge::Seconds(10));
    /// ```
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        match (self, other) {
            (Self::Permanent, x) | (x, Self::Permanent) => x,
            (Self::Seconds(a), Self::Seconds(b)) => Self::Seconds(a.min(b)),
        }
    }
}

/// Something whose changes must invalidate a cached trail.
pub trait Cacheable {
    /// Cache tags identifying this object.
    fn cache_tags(&self) -> Vec<String>;

    /// Maximum age of output derived from this object.
    fn cache_max_age(&self) -> MaxAge {
        MaxAge::Permanent
    }
}

/// Cache metadata accumulated while building a trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CacheMetadata {
    /// Request contexts the output varies by.
    pub contexts: BTreeSet<String>,
    /// Tags of every consulted entity.
    pub tags: BTreeSet<String>,
    /// Maximum age.
    pub max_age: MaxAge,
}

/// One top-level breadcrumb with its optional link set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailEntry {
    /// The top-level link.
    pub link: LinkSpec,
    /// Sibling links, present once a set has been started on this entry.
    pub siblings: Option<Vec<LinkSpec>>,
}

/// An ordered breadcrumb trail.
///
/// # Examples
///
/// ```
/// use crumbtrail::{LinkSpec, LinkTrail};
///
/// let mut trail = LinkTrail::new();
/// trail.add_link(LinkSpec::front("Home"));
/// trail.add_link(LinkSpec::route("Newsletters", "entity.node.canonical", "node", "1"));
/// trail.start_link_set().unwrap();
/// trail.add_sub_link(LinkSpec::route("Photographs", "entity.node.canonical", "node", "2")).unwrap();
/// trail.add_link(LinkSpec::unlinked(""));
///
/// assert_eq!(trail.len(), 2);
/// assert_eq!(trail.entries()[1].siblings.as_ref().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkTrail {
    entries: Vec<TrailEntry>,
    set_open: bool,
    cache: CacheMetadata,
}

impl LinkTrail {
    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a top-level link and closes any open link set.
    ///
    /// Links with an empty label are dropped.
    pub fn add_link(&mut self, link: LinkSpec) -> &mut Self {
        if !link.has_label() {
            log::debug!("dropping breadcrumb with empty label");
            return self;
        }
        self.entries.push(TrailEntry {
            link,
            siblings: None,
        });
        self.set_open = false;
        self
    }

    /// Opens an empty link set on the most recent top-level link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTrail`] if no top-level link exists yet.
    pub fn start_link_set(&mut self) -> Result<&mut Self> {
        let last = self.entries.last_mut().ok_or(Error::EmptyTrail)?;
        last.siblings.get_or_insert_with(Vec::new);
        self.set_open = true;
        Ok(self)
    }

    /// Appends a link to the open link set.
    ///
    /// Links with an empty label are dropped, but only after the open set
    /// has been checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenLinkSet`] if no link set is open.
    pub fn add_sub_link(&mut self, link: LinkSpec) -> Result<&mut Self> {
        if !self.set_open {
            return Err(Error::NoOpenLinkSet);
        }
        if !link.has_label() {
            log::debug!("dropping sub-link with empty label");
            return Ok(self);
        }
        if let Some(siblings) = self.entries.last_mut().and_then(|e| e.siblings.as_mut()) {
            siblings.push(link);
        }
        Ok(self)
    }

    /// Returns `true` while a link set accepts sub-links.
    #[must_use]
    pub fn has_open_link_set(&self) -> bool {
        self.set_open
    }

    /// Adds request cache contexts.
    pub fn add_cache_contexts<I, S>(&mut self, contexts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cache.contexts.extend(contexts.into_iter().map(Into::into));
        self
    }

    /// Registers a cache dependency on a consulted object.
    pub fn add_cacheable_dependency(&mut self, dependency: &impl Cacheable) -> &mut Self {
        self.cache.tags.extend(dependency.cache_tags());
        self.cache.max_age = self.cache.max_age.min(dependency.cache_max_age());
        self
    }

    /// Lowers the maximum age if `max_age` is stricter.
    pub fn merge_max_age(&mut self, max_age: MaxAge) -> &mut Self {
        self.cache.max_age = self.cache.max_age.min(max_age);
        self
    }

    /// Returns the top-level entries.
    #[must_use]
    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// Returns the accumulated cache metadata.
    #[must_use]
    pub fn cache(&self) -> &CacheMetadata {
        &self.cache
    }

    /// Returns the number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the trail has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the top-level labels in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.link.label.as_str()).collect()
    }

    /// Produces the structure handed to the host's templating layer.
    #[must_use]
    pub fn render(&self) -> RenderedTrail {
        let links = if self.entries.is_empty() {
            None
        } else {
            Some(
                self.entries
                    .iter()
                    .map(|entry| RenderedEntry {
                        link: entry.link.clone(),
                        siblings: entry.siblings.clone().unwrap_or_default(),
                    })
                    .collect(),
            )
        };
        RenderedTrail {
            cache: self.cache.clone(),
            links,
        }
    }
}

/// A rendered top-level entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEntry {
    /// The top-level link.
    #[serde(flatten)]
    pub link: LinkSpec,
    /// Sibling links, empty when the entry has none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub siblings: Vec<LinkSpec>,
}

/// Output of [`LinkTrail::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTrail {
    /// Cache metadata for the host's output cache.
    pub cache: CacheMetadata,
    /// Entries in order; `None` for an empty trail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<RenderedEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tagged(&'static str, MaxAge);

    impl Cacheable for Tagged {
        fn cache_tags(&self) -> Vec<String> {
            vec![self.0.to_string()]
        }

        fn cache_max_age(&self) -> MaxAge {
            self.1
        }
    }

    #[test]
    fn test_add_link_preserves_order() {
        let mut trail = LinkTrail::new();
        trail
            .add_link(LinkSpec::front("Home"))
            .add_link(LinkSpec::unlinked("A"))
            .add_link(LinkSpec::unlinked("B"));
        assert_eq!(trail.labels(), vec!["Home", "A", "B"]);
    }

    #[test]
    fn test_empty_labels_dropped() {
        let mut trail = LinkTrail::new();
        trail.add_link(LinkSpec::front("Home"));
        trail.add_link(LinkSpec::unlinked(""));
        trail.add_link(LinkSpec::unlinked("   "));
        assert_eq!(trail.len(), 1);

        trail.start_link_set().unwrap();
        trail.add_sub_link(LinkSpec::unlinked("")).unwrap();
        assert_eq!(trail.entries()[0].siblings, Some(Vec::new()));
    }

    #[test]
    fn test_sub_link_without_set_fails() {
        let mut trail = LinkTrail::new();
        trail.add_link(LinkSpec::front("Home"));
        let err = trail.add_sub_link(LinkSpec::unlinked("x")).unwrap_err();
        assert!(matches!(err, Error::NoOpenLinkSet));
        assert!(trail.entries()[0].siblings.is_none());
    }

    #[test]
    fn test_start_set_on_empty_trail_fails() {
        let mut trail = LinkTrail::new();
        assert!(matches!(trail.start_link_set(), Err(Error::EmptyTrail)));
        assert!(!trail.has_open_link_set());
    }

    #[test]
    fn test_new_top_level_link_closes_set() {
        let mut trail = LinkTrail::new();
        trail.add_link(LinkSpec::front("Home"));
        trail.start_link_set().unwrap();
        trail.add_sub_link(LinkSpec::unlinked("a")).unwrap();
        trail.add_sub_link(LinkSpec::unlinked("b")).unwrap();
        trail.add_link(LinkSpec::unlinked("Page"));

        assert!(!trail.has_open_link_set());
        assert!(trail.add_sub_link(LinkSpec::unlinked("c")).is_err());

        let siblings = trail.entries()[0].siblings.as_ref().unwrap();
        let labels: Vec<_> = siblings.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn test_dropped_link_keeps_set_open() {
        let mut trail = LinkTrail::new();
        trail.add_link(LinkSpec::front("Home"));
        trail.start_link_set().unwrap();
        trail.add_link(LinkSpec::unlinked(""));
        assert!(trail.has_open_link_set());
    }

    #[test]
    fn test_render_empty_trail() {
        let mut trail = LinkTrail::new();
        trail.add_cache_contexts(["route"]);
        let rendered = trail.render();
        assert!(rendered.links.is_none());
        assert!(rendered.cache.contexts.contains("route"));
    }

    #[test]
    fn test_render_structure() {
        let mut trail = LinkTrail::new();
        trail.add_link(LinkSpec::front("Home"));
        trail.add_link(LinkSpec::route("C", "view.collection.page", "node", "1"));
        trail.start_link_set().unwrap();
        trail
            .add_sub_link(LinkSpec::route("D", "entity.node.canonical", "node", "2"))
            .unwrap();

        let rendered = trail.render();
        let links = rendered.links.unwrap();
        assert_eq!(links.len(), 2);
        assert!(links[0].siblings.is_empty());
        assert_eq!(links[1].siblings.len(), 1);
        assert_eq!(links[1].siblings[0].label, "D");
    }

    #[test]
    fn test_cache_dependencies() {
        let mut trail = LinkTrail::new();
        trail.add_cacheable_dependency(&Tagged("node:1", MaxAge::Permanent));
        trail.add_cacheable_dependency(&Tagged("node:2", MaxAge::Seconds(300)));
        trail.add_cacheable_dependency(&Tagged("node:1", MaxAge::Seconds(900)));

        let cache = trail.cache();
        assert_eq!(cache.tags.len(), 2);
        assert_eq!(cache.max_age, MaxAge::Seconds(300));

        trail.merge_max_age(MaxAge::Seconds(0));
        assert_eq!(trail.cache().max_age, MaxAge::Seconds(0));
    }

    #[test]
    fn test_rendered_json_shape() {
        let mut trail = LinkTrail::new();
        trail.add_link(LinkSpec::front("Home"));
        trail.add_link(LinkSpec::unlinked("Photographs"));

        let json = serde_json::to_value(trail.render()).unwrap();
        assert_eq!(json["links"][0]["label"], "Home");
        assert_eq!(json["links"][0]["target"]["kind"], "front");
        assert_eq!(json["links"][1]["target"]["kind"], "unlinked");
        assert!(json["links"][1].get("siblings").is_none());
    }
}
