//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, LabelConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use crumbtrail::config::{Config, ConfigMerger};
///
/// let low = Config { max_depth: Some(2), ..Default::default() };
/// let high = Config { max_depth: Some(6), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.max_depth, Some(6));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Scalars: source overwrites if Some
    /// - `reference_fields`, `search_views`: replaced whole, order matters
    /// - `model_links`: merged per classification name
    /// - `labels`: merged per label
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.reference_fields.is_some() {
            target.reference_fields.clone_from(&source.reference_fields);
        }

        if source.ancestry_field.is_some() {
            target.ancestry_field.clone_from(&source.ancestry_field);
        }

        if source.part_of_field.is_some() {
            target.part_of_field.clone_from(&source.part_of_field);
        }

        if source.model_field.is_some() {
            target.model_field.clone_from(&source.model_field);
        }

        if source.max_depth.is_some() {
            target.max_depth = source.max_depth;
        }

        if source.include_self.is_some() {
            target.include_self = source.include_self;
        }

        if source.collection_path.is_some() {
            target.collection_path.clone_from(&source.collection_path);
        }

        if source.item_path_prefix.is_some() {
            target.item_path_prefix.clone_from(&source.item_path_prefix);
        }

        if source.search_views.is_some() {
            target.search_views.clone_from(&source.search_views);
        }

        if let Some(ref source_links) = source.model_links {
            let links = target.model_links.get_or_insert_with(Default::default);
            links.extend(source_links.iter().map(|(k, v)| (k.clone(), *v)));
        }

        if let Some(ref source_labels) = source.labels {
            target.labels = Some(match &target.labels {
                Some(target_labels) => Self::merge_labels(target_labels, source_labels),
                None => source_labels.clone(),
            });
        }
    }

    fn merge_labels(target: &LabelConfig, source: &LabelConfig) -> LabelConfig {
        LabelConfig {
            home: source.home.clone().or_else(|| target.home.clone()),
            search_results: source
                .search_results
                .clone()
                .or_else(|| target.search_results.clone()),
            ellipsis: source.ellipsis.clone().or_else(|| target.ellipsis.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LinkShape;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("/cfg/{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }

    #[test]
    fn test_reference_fields_replaced_not_accumulated() {
        let low = Config {
            reference_fields: Some(vec!["field_member_of".into(), "field_a".into()]),
            ..Default::default()
        };
        let high = Config {
            reference_fields: Some(vec!["field_b".into()]),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(2, high)]);
        assert_eq!(merged.reference_fields, Some(vec!["field_b".to_string()]));
    }

    #[test]
    fn test_absent_values_do_not_override() {
        let low = Config {
            include_self: Some(true),
            max_depth: Some(4),
            ..Default::default()
        };
        let high = Config {
            max_depth: Some(8),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(2, high)]);
        assert_eq!(merged.include_self, Some(true));
        assert_eq!(merged.max_depth, Some(8));
    }

    #[test]
    fn test_model_links_merged_per_key() {
        let mut low_links = BTreeMap::new();
        low_links.insert("Newspaper".to_string(), LinkShape::CollectionView);
        low_links.insert("Book".to_string(), LinkShape::CanonicalView);
        let mut high_links = BTreeMap::new();
        high_links.insert("Book".to_string(), LinkShape::Default);

        let mut target = Config {
            model_links: Some(low_links),
            ..Default::default()
        };
        ConfigMerger::merge_into(
            &mut target,
            &Config {
                model_links: Some(high_links),
                ..Default::default()
            },
        );

        let links = target.model_links.unwrap();
        assert_eq!(links["Newspaper"], LinkShape::CollectionView);
        assert_eq!(links["Book"], LinkShape::Default);
    }

    #[test]
    fn test_labels_merged_per_field() {
        let mut target = Config {
            labels: Some(LabelConfig {
                home: Some("Accueil".into()),
                search_results: Some("Résultats".into()),
                ellipsis: None,
            }),
            ..Default::default()
        };
        ConfigMerger::merge_into(
            &mut target,
            &Config {
                labels: Some(LabelConfig {
                    search_results: Some("Results".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        let labels = target.labels.unwrap();
        assert_eq!(labels.home.as_deref(), Some("Accueil"));
        assert_eq!(labels.search_results.as_deref(), Some("Results"));
        assert_eq!(labels.ellipsis, None);
    }
}
