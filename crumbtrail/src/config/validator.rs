//! Configuration validation.

use crate::config::schema::{Config, MAX_DEPTH_LIMIT};
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use crumbtrail::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { max_depth: Some(5000), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// An empty `reference_fields` list is accepted: it switches reference
    /// trails off and leaves the minimal Home + title trail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending key.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref fields) = config.reference_fields {
            let mut seen = HashSet::new();
            for field in fields {
                Self::validate_field_name("reference_fields", field)?;
                if !seen.insert(field.as_str()) {
                    return Err(Error::Validation {
                        field: "reference_fields".into(),
                        message: format!("Duplicate field '{field}'"),
                    });
                }
            }
        }

        if let Some(ref field) = config.ancestry_field {
            Self::validate_field_name("ancestry_field", field)?;
        }

        if let Some(ref field) = config.part_of_field {
            Self::validate_field_name("part_of_field", field)?;
        }

        if let Some(ref field) = config.model_field {
            Self::validate_field_name("model_field", field)?;
        }

        if let Some(depth) = config.max_depth {
            if depth > MAX_DEPTH_LIMIT {
                return Err(Error::Validation {
                    field: "max_depth".into(),
                    message: format!("Must not exceed {MAX_DEPTH_LIMIT} (0 means unlimited)"),
                });
            }
        }

        if let Some(ref path) = config.collection_path {
            if !path.starts_with('/') {
                return Err(Error::Validation {
                    field: "collection_path".into(),
                    message: "Must be an absolute path starting with '/'".into(),
                });
            }
        }

        if let Some(ref prefix) = config.item_path_prefix {
            if prefix.trim().is_empty() || prefix.contains('/') {
                return Err(Error::Validation {
                    field: "item_path_prefix".into(),
                    message: "Must be a single non-empty path segment".into(),
                });
            }
        }

        if let Some(ref views) = config.search_views {
            for view in views {
                if view.trim().is_empty() {
                    return Err(Error::Validation {
                        field: "search_views".into(),
                        message: "View ids cannot be empty".into(),
                    });
                }
            }
        }

        if let Some(ref links) = config.model_links {
            if links.keys().any(|name| name.trim().is_empty()) {
                return Err(Error::Validation {
                    field: "model_links".into(),
                    message: "Classification names cannot be empty".into(),
                });
            }
        }

        Ok(())
    }

    /// Field names are machine names: non-empty, no whitespace or null bytes.
    fn validate_field_name(key: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: key.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if value.chars().any(|c| c.is_whitespace() || c == '\0') {
            return Err(Error::Validation {
                field: key.into(),
                message: format!("Invalid field name '{value}'"),
            });
        }

        if value.len() > 255 {
            return Err(Error::Validation {
                field: key.into(),
                message: "Cannot exceed 255 characters".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_reference_fields_allowed() {
        let config = Config {
            reference_fields: Some(Vec::new()),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_duplicate_reference_field() {
        let config = Config {
            reference_fields: Some(vec!["field_member_of".into(), "field_member_of".into()]),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "reference_fields");
    }

    #[test]
    fn test_blank_and_spaced_field_names() {
        let config = Config {
            ancestry_field: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "ancestry_field");

        let config = Config {
            part_of_field: Some("field part".into()),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "part_of_field");
    }

    #[test]
    fn test_max_depth_limit() {
        let ok = Config {
            max_depth: Some(MAX_DEPTH_LIMIT),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&ok).is_ok());

        let too_deep = Config {
            max_depth: Some(MAX_DEPTH_LIMIT + 1),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&too_deep)), "max_depth");
    }

    #[test]
    fn test_paths() {
        let config = Config {
            collection_path: Some("collection/%node".into()),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "collection_path");

        let config = Config {
            item_path_prefix: Some("node/x".into()),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "item_path_prefix");
    }

    #[test]
    fn test_blank_classification_name() {
        let mut links = BTreeMap::new();
        links.insert(" ".to_string(), crate::config::LinkShape::Default);
        let config = Config {
            model_links: Some(links),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "model_links");
    }
}
