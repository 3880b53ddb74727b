//! Main entry point for the crumbtrail CLI.
//!
//! Commands:
//! - `import`: Load a content fixture into the store
//! - `trail`: Print the breadcrumb trail for a page
//! - `validate`: Check a configuration file
//! - `show-config`: Print the effective trail settings
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _level = crumbtrail::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        config: cli.config,
    };

    let result = match cli.command {
        cli::Command::Import(cmd) => cmd.execute(&global),
        cli::Command::Trail(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::ShowConfig(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            if !(global.quiet && e.is_semantic()) {
                eprintln!("Error: {e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
