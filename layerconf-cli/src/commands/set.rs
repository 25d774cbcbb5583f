//! Command to update keys in an existing configuration file.

use crate::error::CliError;
use crate::utils::{parse_assignment, resolver, GlobalOptions};
use clap::Args;
use layerconf::source::read_file;
use layerconf::{ConfigSaver, Document, Error, SourceResolver};
use std::path::PathBuf;

/// Set keys in the file a path resolves to.
#[derive(Args)]
pub struct SetCommand {
    /// Path hint of the file to update
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Assignments such as `server.port=8080`
    #[arg(value_name = "KEY=VALUE", required = true)]
    pub assignments: Vec<String>,
}

impl SetCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let assignments = self
            .assignments
            .iter()
            .map(|raw| parse_assignment(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let resolver = resolver(global);
        let found = resolver
            .resolve(&self.path, global.depth)
            .ok_or_else(|| Error::PathNotFound {
                hint: self.path.clone(),
            })?;

        let prefix = global.env_prefix.clone().unwrap_or_default();
        let mut doc: Document = read_file(&found, &prefix)?;
        for (key, value) in assignments {
            log::debug!("setting {key} in {}", found.display());
            doc.set(&key, value);
        }

        let written = ConfigSaver::with_resolver(resolver).save(&doc, &self.path, global.depth)?;
        if !global.quiet {
            println!("Updated {}", written.display());
        }
        Ok(())
    }
}
