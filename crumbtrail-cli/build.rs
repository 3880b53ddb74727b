//! Build script for crumbtrail-cli.
//!
//! Renders the man page into `OUT_DIR/man` with `clap_mangen`. Build scripts
//! cannot depend on the crate being built, so the command tree is restated
//! here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("crumbtrail")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compute breadcrumb trails for repository content")
        .long_about(
            "Compute breadcrumb trails for digital-repository content from member-of \
             references stored in a local content store",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("CRUMBTRAIL_DATA_DIR"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read settings from this file instead of discovering crumbtrail.yaml")
                .value_name("FILE")
                .global(true)
                .env("CRUMBTRAIL_CONFIG"),
        )
        .subcommands(vec![
            Command::new("import")
                .about("Load a YAML content fixture into the store")
                .long_about("Import items, terms, entities, aliases and routes from a fixture"),
            Command::new("trail")
                .about("Print the breadcrumb trail for a page")
                .long_about(
                    "Build the trail for a content item, term or view page; exits 1 when \
                     the page gets no breadcrumb",
                ),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a crumbtrail configuration file for errors"),
            Command::new("show-config")
                .about("Print the effective trail settings")
                .long_about("Print the merged configuration, resolved against defaults, as YAML"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("crumbtrail.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
