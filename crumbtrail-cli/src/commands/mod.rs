//! CLI command implementations.
//!
//! - `import`: Load a content fixture into the store
//! - `trail`: Print the breadcrumb trail for a page
//! - `validate`: Validate a configuration file
//! - `show_config`: Print the effective trail settings
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod import;
pub mod show_config;
pub mod trail;
pub mod validate;

pub use completions::CompletionsCommand;
pub use import::ImportCommand;
pub use show_config::ShowConfigCommand;
pub use trail::TrailCommand;
pub use validate::ValidateCommand;
