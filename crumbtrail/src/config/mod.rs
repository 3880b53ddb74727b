//! Configuration system for crumbtrail.
//!
//! This module provides layered configuration with support for:
//! - YAML configuration files (user config and site `crumbtrail.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`CRUMBTRAIL_*`)
//! 3. Local site config (`crumbtrail.local.yaml`)
//! 4. Site config (`crumbtrail.yaml`)
//! 5. User config (`~/.crumbtrail/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use crumbtrail::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         reference_fields: Some(vec!["field_member_of".into()]),
//!         max_depth: Some(5),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! let settings = config.resolve();
//! assert_eq!(settings.max_depth, 5);
//! assert!(!settings.include_self);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, LabelConfig, Labels, LinkShape, TrailSettings};
pub use validator::ConfigValidator;
