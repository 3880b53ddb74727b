//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "crumbtrail";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            match self.shell {
                Shell::Bash => eprintln!("# eval \"$(crumbtrail completions bash)\""),
                Shell::Zsh => eprintln!("# crumbtrail completions zsh > ~/.zsh/completions/_crumbtrail"),
                Shell::Fish => eprintln!("# crumbtrail completions fish | source"),
                _ => {}
            }
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
