//! Main entry point for the layerconf CLI.
//!
//! This is the command-line interface for layered configuration loading.
//! It provides commands for inspecting merged configuration:
//! - `show`: Merge sources and print the result
//! - `check`: Fail unless every required key is set
//! - `locate`: Print the file a path hint resolves to
//! - `set`: Update keys in an existing configuration file

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library log records to stderr at the requested verbosity
    let logger = layerconf::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        logger.warn(&format!("logging unavailable: {e}"));
    }

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        depth: cli.depth,
        base_dir: cli.base_dir,
        env_prefix: cli.env_prefix,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Locate(cmd) => cmd.execute(&global),
        cli::Command::Set(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
