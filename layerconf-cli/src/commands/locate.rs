//! Command to show which file a path hint resolves to.

use crate::error::CliError;
use crate::utils::{resolver, GlobalOptions};
use clap::Args;
use layerconf::SourceResolver;
use std::path::PathBuf;

/// Print the file a path resolves to.
#[derive(Args)]
pub struct LocateCommand {
    /// Path hint to resolve
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

impl LocateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match resolver(global).resolve(&self.path, global.depth) {
            Some(found) => {
                println!("{}", found.display());
                Ok(())
            }
            None => Err(CliError::SemanticFailure(format!(
                "No file found for {} within {} parent directories",
                self.path.display(),
                global.depth
            ))),
        }
    }
}
