#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # crumbtrail
//!
//! Breadcrumb trails for digital-repository content.
//!
//! Repository items point at their parents through configured reference
//! fields ("member of", "part of"). This library walks those references up
//! to a root, guards against cycles and runaway depth, and renders each
//! ancestor as a link shaped by its model classification.
//!
//! ## Core Types
//!
//! - [`TrailBuilder`] and [`Applicability`]: deciding on and assembling a trail
//! - [`LinkTrail`], [`LinkSpec`] and [`RenderedTrail`]: the trail itself
//! - [`ContentItem`], [`Entity`] and [`ItemId`]: the content model
//! - [`ItemLoader`], [`TermLoader`], [`RouteResolver`], [`AliasResolver`]:
//!   what a host provides
//! - [`Database`]: a `SQLite` content store implementing every host trait
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use crumbtrail::database::{Database, Fixture};
//! use crumbtrail::{PageContext, TrailBuilder, TrailSettings};
//!
//! let mut db = Database::open_in_memory().unwrap();
//! db.import_fixture(&Fixture::from_yaml_str(r#"
//! terms:
//!   - { id: "10", name: Collection }
//! routes:
//!   /collection/%node: view.collection.page
//! items:
//!   - { id: 1, title: Newspapers, fields: { field_model: ["taxonomy_term:10"] } }
//!   - { id: 2, title: Daily Gazette, fields: { field_member_of: [1] } }
//! "#).unwrap()).unwrap();
//!
//! let settings = TrailSettings { include_self: true, ..TrailSettings::default() };
//! let builder = TrailBuilder::new(&settings, &db);
//! let page = PageContext::for_node("2").with_title("Daily Gazette");
//!
//! let trail = builder.build(&page, &builder.applies(&page).unwrap()).unwrap();
//! assert_eq!(trail.labels(), vec!["Home", "Newspapers", "Daily Gazette"]);
//! assert_eq!(trail.entries()[1].link.target.route_name(), "view.collection.page");
//! ```

pub mod builder;
pub mod classifier;
pub mod config;
pub mod database;
pub mod error;
pub mod host;
pub mod item;
pub mod logging;
pub mod output;
pub mod resolver;
pub mod trail;
pub mod walker;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export key types at crate root for convenience
pub use builder::{Applicability, TrailBuilder};
pub use classifier::LinkClassifier;
pub use config::{Config, ConfigBuilder, TrailSettings};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use host::{
    AliasResolver, Host, ItemLoader, PageContext, PageContextProvider, RouteParameters,
    RouteResolver, TermLoader,
};
pub use item::{ContentItem, Entity, EntityRef, ForeignEntity, ItemId, Term};
pub use logging::{init_logger, LogLevel, Logger};
pub use resolver::ReferenceResolver;
pub use trail::{
    CacheMetadata, Cacheable, LinkSpec, LinkTarget, LinkTrail, MaxAge, RenderedEntry,
    RenderedTrail, TrailEntry,
};
pub use walker::{AncestryChain, AncestryWalker};
