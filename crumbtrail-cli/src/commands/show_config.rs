//! Command to print the effective configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;

/// Print the effective trail settings as YAML.
#[derive(Args)]
pub struct ShowConfigCommand {
    /// Print only the values set by configuration sources, without defaults
    #[arg(long)]
    pub raw: bool,
}

impl ShowConfigCommand {
    /// Execute the show-config command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let yaml = if self.raw {
            serde_yaml::to_string(&config)
        } else {
            serde_yaml::to_string(&config.resolve())
        }
        .map_err(|e| CliError::Config(e.to_string()))?;

        print!("{yaml}");
        Ok(())
    }
}
