//! Configuration schema definitions.
//!
//! [`Config`] is the file/environment shape: every field optional so that
//! sources can be layered. [`TrailSettings`] is the resolved, fully
//! populated form the trail builder reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default member-of field.
pub const DEFAULT_ANCESTRY_FIELD: &str = "field_member_of";

/// Default part-of field.
pub const DEFAULT_PART_OF_FIELD: &str = "field_part_of";

/// Default model classification field.
pub const DEFAULT_MODEL_FIELD: &str = "field_model";

/// Default path whose route lists a collection's members.
pub const DEFAULT_COLLECTION_PATH: &str = "/collection/%node";

/// Largest accepted `max_depth`.
pub const MAX_DEPTH_LIMIT: usize = 1000;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use crumbtrail::config::Config;
///
/// let config: Config = serde_yaml::from_str(r#"
/// reference_fields: [field_member_of, field_constituent_of]
/// max_depth: 4
/// include_self: true
/// "#).unwrap();
///
/// let settings = config.resolve();
/// assert_eq!(settings.reference_fields.len(), 2);
/// assert_eq!(settings.max_depth, 4);
/// assert_eq!(settings.ancestry_field.as_deref(), Some("field_member_of"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fields whose referenced entities form an item's parent level.
    pub reference_fields: Option<Vec<String>>,

    /// Field followed upward by the membership walk.
    pub ancestry_field: Option<String>,

    /// Field followed by the part-of fallback walk.
    pub part_of_field: Option<String>,

    /// Field referencing the item's model classification term.
    pub model_field: Option<String>,

    /// Maximum chain length, 0 for unlimited.
    pub max_depth: Option<usize>,

    /// Append the current page title to item trails.
    pub include_self: Option<bool>,

    /// Link shape per model classification name.
    pub model_links: Option<BTreeMap<String, LinkShape>>,

    /// Path resolved to the collection listing route.
    pub collection_path: Option<String>,

    /// First path segment of item paths (`/<prefix>/<id>`).
    pub item_path_prefix: Option<String>,

    /// Views rendered as a plain search-results crumb.
    pub search_views: Option<Vec<String>>,

    /// Fixed labels.
    pub labels: Option<LabelConfig>,
}

/// How an ancestor is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkShape {
    /// Link to the collection listing route.
    CollectionView,
    /// Link to the item's canonical view route.
    CanonicalView,
    /// Whatever link the host considers canonical for the item.
    Default,
}

/// Fixed labels used in trails.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LabelConfig {
    /// Label of the front page link.
    pub home: Option<String>,
    /// Label shown on search result views.
    pub search_results: Option<String>,
    /// Label marking ancestors cut off by `max_depth`.
    pub ellipsis: Option<String>,
}

/// Resolved labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    /// Front page label.
    pub home: String,
    /// Search results label.
    pub search_results: String,
    /// Truncation marker.
    pub ellipsis: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            home: "Home".to_string(),
            search_results: "Search Results".to_string(),
            ellipsis: "\u{2026}".to_string(),
        }
    }
}

/// Fully resolved settings for one trail build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailSettings {
    /// Fields scanned for referenced entities, in order.
    pub reference_fields: Vec<String>,
    /// Membership walk field; `None` disables ancestry trails.
    pub ancestry_field: Option<String>,
    /// Part-of fallback field.
    pub part_of_field: Option<String>,
    /// Model classification field.
    pub model_field: String,
    /// Maximum chain length, 0 for unlimited.
    pub max_depth: usize,
    /// Append the page title to item trails.
    pub include_self: bool,
    /// Link shape per classification name.
    pub model_links: BTreeMap<String, LinkShape>,
    /// Path of the collection listing route.
    pub collection_path: String,
    /// First segment of item paths.
    pub item_path_prefix: String,
    /// Search view ids.
    pub search_views: Vec<String>,
    /// Fixed labels.
    pub labels: Labels,
}

/// Built-in classification table.
#[must_use]
pub fn default_model_links() -> BTreeMap<String, LinkShape> {
    let mut links = BTreeMap::new();
    links.insert("Collection".to_string(), LinkShape::CollectionView);
    links.insert("Paged Content".to_string(), LinkShape::CanonicalView);
    links
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            reference_fields: vec![DEFAULT_ANCESTRY_FIELD.to_string()],
            ancestry_field: Some(DEFAULT_ANCESTRY_FIELD.to_string()),
            part_of_field: Some(DEFAULT_PART_OF_FIELD.to_string()),
            model_field: DEFAULT_MODEL_FIELD.to_string(),
            max_depth: 0,
            include_self: false,
            model_links: default_model_links(),
            collection_path: DEFAULT_COLLECTION_PATH.to_string(),
            item_path_prefix: "node".to_string(),
            search_views: vec!["advanced_search".to_string()],
            labels: Labels::default(),
        }
    }
}

impl Config {
    /// Resolves optional values against the built-in defaults.
    ///
    /// Configured `model_links` entries are layered over the built-in
    /// table, so configuring a new classification keeps `Collection` and
    /// `Paged Content` unless they are overridden explicitly.
    #[must_use]
    pub fn resolve(&self) -> TrailSettings {
        let defaults = TrailSettings::default();

        let mut model_links = defaults.model_links;
        if let Some(ref configured) = self.model_links {
            model_links.extend(configured.iter().map(|(k, v)| (k.clone(), *v)));
        }

        let labels = self.labels.clone().unwrap_or_default();
        let default_labels = defaults.labels;

        TrailSettings {
            reference_fields: self
                .reference_fields
                .clone()
                .unwrap_or(defaults.reference_fields),
            ancestry_field: self.ancestry_field.clone().or(defaults.ancestry_field),
            part_of_field: self.part_of_field.clone().or(defaults.part_of_field),
            model_field: self.model_field.clone().unwrap_or(defaults.model_field),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            include_self: self.include_self.unwrap_or(defaults.include_self),
            model_links,
            collection_path: self
                .collection_path
                .clone()
                .unwrap_or(defaults.collection_path),
            item_path_prefix: self
                .item_path_prefix
                .clone()
                .unwrap_or(defaults.item_path_prefix),
            search_views: self.search_views.clone().unwrap_or(defaults.search_views),
            labels: Labels {
                home: labels.home.unwrap_or(default_labels.home),
                search_results: labels
                    .search_results
                    .unwrap_or(default_labels.search_results),
                ellipsis: labels.ellipsis.unwrap_or(default_labels.ellipsis),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let settings = Config::default().resolve();
        assert_eq!(settings, TrailSettings::default());
        assert_eq!(settings.labels.home, "Home");
        assert_eq!(settings.model_links.len(), 2);
    }

    #[test]
    fn test_model_links_layer_over_defaults() {
        let config: Config = serde_yaml::from_str(
            r"
model_links:
  Newspaper: collection_view
  Paged Content: default
",
        )
        .unwrap();
        let settings = config.resolve();
        assert_eq!(settings.model_links["Newspaper"], LinkShape::CollectionView);
        assert_eq!(settings.model_links["Paged Content"], LinkShape::Default);
        assert_eq!(settings.model_links["Collection"], LinkShape::CollectionView);
    }

    #[test]
    fn test_partial_labels() {
        let config = Config {
            labels: Some(LabelConfig {
                home: Some("Start".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let labels = config.resolve().labels;
        assert_eq!(labels.home, "Start");
        assert_eq!(labels.search_results, "Search Results");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("referenceFields: [a]");
        assert!(result.is_err());
    }
}
