//! CLI structure and command definitions.

use crate::commands::{
    CompletionsCommand, ImportCommand, ShowConfigCommand, TrailCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Breadcrumb trails for repository content.
#[derive(Parser)]
#[command(name = "crumbtrail")]
#[command(version, about = "Compute breadcrumb trails for repository content", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "CRUMBTRAIL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read settings from this file instead of discovering crumbtrail.yaml
    #[arg(long, value_name = "FILE", global = true, env = "CRUMBTRAIL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Load a YAML content fixture into the store
    Import(ImportCommand),

    /// Print the breadcrumb trail for a page
    Trail(TrailCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Print the effective trail settings
    ShowConfig(ShowConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
