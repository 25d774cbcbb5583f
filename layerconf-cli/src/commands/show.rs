//! Command to merge sources and print the result.

use crate::error::CliError;
use crate::utils::{load_options, loader, render, GlobalOptions, OutputFormat};
use clap::Args;
use layerconf::Document;
use std::path::PathBuf;

/// Merge sources and print the merged document.
#[derive(Args)]
pub struct ShowCommand {
    /// Configuration paths, highest precedence first
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// List where each layer came from (on stderr, implied by --verbose)
    #[arg(long)]
    pub sources: bool,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let options = load_options(&self.paths, global)?;
        let (doc, sources) = loader(global).merge_sources::<Document>(&options)?;

        if self.sources || global.verbose {
            for source in &sources {
                eprintln!("{source}");
            }
        }

        print!("{}", render(&doc, self.format)?);
        Ok(())
    }
}
