//! Environment variable handling for configuration overrides.
//!
//! `CRUMBTRAIL_*` variables override values from configuration files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use crumbtrail::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value (for example
    /// a non-numeric depth or an unrecognised boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(fields) = env::var("CRUMBTRAIL_REFERENCE_FIELDS") {
            config.reference_fields = Some(Self::parse_list(&fields));
        }

        if let Ok(field) = env::var("CRUMBTRAIL_ANCESTRY_FIELD") {
            config.ancestry_field = Some(field.trim().to_string());
        }

        if let Ok(field) = env::var("CRUMBTRAIL_PART_OF_FIELD") {
            config.part_of_field = Some(field.trim().to_string());
        }

        if let Ok(depth) = env::var("CRUMBTRAIL_MAX_DEPTH") {
            config.max_depth = Some(depth.trim().parse().map_err(|_| Error::Validation {
                field: "CRUMBTRAIL_MAX_DEPTH".into(),
                message: "Must be a non-negative integer".into(),
            })?);
        }

        if let Ok(val) = env::var("CRUMBTRAIL_INCLUDE_SELF") {
            config.include_self = Some(Self::parse_bool("CRUMBTRAIL_INCLUDE_SELF", &val)?);
        }

        Ok(())
    }

    /// Splits a comma-separated list, dropping blank entries.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
