//! Integration tests for layered configuration.
//!
//! Tests that touch `CRUMBTRAIL_*` variables are marked `#[serial]`;
//! environment variables are process-global.

mod common;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use crumbtrail::config::{Config, ConfigBuilder, LinkShape};
use crumbtrail::error::Error;

fn config_fixture(name: &str) -> PathBuf {
    common::fixture_path("configs").join(name)
}

fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Sets an environment variable for the guard's lifetime.
struct EnvGuard {
    key: &'static str,
    old_value: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self { key, old_value }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old_value {
            Some(ref value) => env::set_var(self.key, value),
            None => env::remove_var(self.key),
        }
    }
}

#[test]
fn test_site_fixture_resolves() {
    let config = ConfigBuilder::new()
        .with_file(&config_fixture("site.yaml"))
        .skip_env()
        .build()
        .unwrap();
    let settings = config.resolve();

    assert_eq!(
        settings.reference_fields,
        vec!["field_member_of".to_string(), "field_part_of".to_string()]
    );
    assert_eq!(settings.max_depth, 6);
    assert!(settings.include_self);
    assert_eq!(settings.labels.home, "Start");
    assert_eq!(settings.labels.search_results, "Search Results");

    assert_eq!(
        settings.model_links.get("Newspaper"),
        Some(&LinkShape::CollectionView)
    );
    assert_eq!(
        settings.model_links.get("Collection"),
        Some(&LinkShape::CollectionView)
    );
    assert_eq!(
        settings.model_links.get("Paged Content"),
        Some(&LinkShape::CanonicalView)
    );
}

#[test]
fn test_unknown_keys_rejected() {
    let result = ConfigBuilder::new()
        .with_file(&config_fixture("invalid.yaml"))
        .skip_env()
        .build();
    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn test_missing_explicit_file() {
    let dir = TempDir::new().unwrap();
    let result = ConfigBuilder::new()
        .with_file(&dir.path().join("nope.yaml"))
        .skip_env()
        .build();
    assert!(matches!(result, Err(Error::InvalidPath { .. })));
}

#[test]
fn test_precedence_user_site_local() {
    let data_dir = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();
    let nested = site.path().join("web").join("modules");
    fs::create_dir_all(&nested).unwrap();

    write_config(
        data_dir.path(),
        "config.yaml",
        "max_depth: 2\ninclude_self: true\nitem_path_prefix: object\n",
    );
    write_config(site.path(), "crumbtrail.yaml", "max_depth: 4\nsearch_views: [find]\n");
    write_config(site.path(), "crumbtrail.local.yaml", "max_depth: 8\n");

    let config = ConfigBuilder::new()
        .with_working_dir(&nested)
        .with_data_dir(data_dir.path())
        .skip_env()
        .build()
        .unwrap();

    assert_eq!(config.max_depth, Some(8));
    assert_eq!(config.include_self, Some(true));
    assert_eq!(config.item_path_prefix.as_deref(), Some("object"));
    assert_eq!(config.search_views, Some(vec!["find".to_string()]));
}

#[test]
fn test_label_layers_merge_per_label() {
    let data_dir = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();
    write_config(
        data_dir.path(),
        "config.yaml",
        "labels:\n  home: Accueil\n  ellipsis: '...'\n",
    );
    write_config(
        site.path(),
        "crumbtrail.yaml",
        "labels:\n  search_results: Résultats\n",
    );

    let settings = ConfigBuilder::new()
        .with_working_dir(site.path())
        .with_data_dir(data_dir.path())
        .skip_env()
        .build()
        .unwrap()
        .resolve();

    assert_eq!(settings.labels.home, "Accueil");
    assert_eq!(settings.labels.search_results, "Résultats");
    assert_eq!(settings.labels.ellipsis, "...");
}

#[test]
#[serial]
fn test_environment_overrides_files() {
    let site = TempDir::new().unwrap();
    write_config(site.path(), "crumbtrail.yaml", "max_depth: 4\ninclude_self: false\n");

    let _depth = EnvGuard::set("CRUMBTRAIL_MAX_DEPTH", "9");
    let _include = EnvGuard::set("CRUMBTRAIL_INCLUDE_SELF", "yes");
    let _fields = EnvGuard::set("CRUMBTRAIL_REFERENCE_FIELDS", "field_member_of, field_part_of");

    let config = ConfigBuilder::new()
        .with_working_dir(site.path())
        .with_data_dir(site.path())
        .build()
        .unwrap();

    assert_eq!(config.max_depth, Some(9));
    assert_eq!(config.include_self, Some(true));
    assert_eq!(config.reference_fields.map(|f| f.len()), Some(2));
}

#[test]
#[serial]
fn test_programmatic_overrides_environment() {
    let _depth = EnvGuard::set("CRUMBTRAIL_MAX_DEPTH", "9");

    let config = ConfigBuilder::new()
        .skip_files()
        .with_config(Config {
            max_depth: Some(1),
            ..Default::default()
        })
        .build()
        .unwrap();

    assert_eq!(config.max_depth, Some(1));
}

#[test]
#[serial]
fn test_invalid_environment_value() {
    let _include = EnvGuard::set("CRUMBTRAIL_INCLUDE_SELF", "sometimes");

    let result = ConfigBuilder::new().skip_files().build();
    assert!(matches!(
        result,
        Err(Error::Validation { ref field, .. }) if field == "CRUMBTRAIL_INCLUDE_SELF"
    ));
}

#[test]
fn test_depth_limit_validated() {
    let result = ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_config(Config {
            max_depth: Some(5000),
            ..Default::default()
        })
        .build();
    assert!(matches!(
        result,
        Err(Error::Validation { ref field, .. }) if field == "max_depth"
    ));
}
