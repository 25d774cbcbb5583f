//! Command to check that required keys are set after merging.

use crate::error::CliError;
use crate::utils::{load_options, loader, GlobalOptions};
use clap::Args;
use layerconf::Document;
use std::path::PathBuf;

/// Merge sources and fail if any required key is unset.
#[derive(Args)]
pub struct CheckCommand {
    /// Configuration paths, highest precedence first
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Dotted key that must be set (repeatable)
    #[arg(long = "require", value_name = "KEY", required = true)]
    pub required: Vec<String>,
}

impl CheckCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let options = load_options(&self.paths, global)?;
        let (doc, _) = loader(global).merge_sources::<Document>(&options)?;

        let missing = doc.missing(&self.required);
        if !missing.is_empty() {
            if !global.quiet {
                for key in &missing {
                    eprintln!("missing: {key}");
                }
            }
            return Err(CliError::SemanticFailure(format!(
                "Missing required configuration fields: {}",
                missing.join(", ")
            )));
        }

        if !global.quiet {
            println!("Configuration is complete");
        }
        Ok(())
    }
}
