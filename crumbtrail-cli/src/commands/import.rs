//! Import command implementation.

use crate::error::CliError;
use crate::utils::{open_database, GlobalOptions};
use clap::Args;
use crumbtrail::database::Fixture;
use std::path::PathBuf;

/// Load a YAML content fixture into the store.
#[derive(Args)]
pub struct ImportCommand {
    /// Fixture file to import
    #[arg(value_name = "FIXTURE")]
    pub fixture: PathBuf,
}

impl ImportCommand {
    /// Execute the import command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.fixture.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.fixture.display()
            )));
        }

        let fixture = Fixture::load(&self.fixture).map_err(|e| {
            CliError::InvalidArguments(format!("{}: {e}", self.fixture.display()))
        })?;

        let mut db = open_database(global, true)?;
        let summary = db.import_fixture(&fixture)?;

        if !global.quiet {
            println!(
                "Imported {} items ({} translations), {} terms, {} entities, {} aliases, {} routes",
                summary.items,
                summary.translations,
                summary.terms,
                summary.entities,
                summary.aliases,
                summary.routes
            );
            if global.verbose {
                println!("Content store: {}", global.database_path()?.display());
            }
        }

        Ok(())
    }
}
