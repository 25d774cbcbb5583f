//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CheckCommand, CompletionsCommand, LocateCommand, SetCommand, ShowCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting and checking layered configuration.
#[derive(Parser)]
#[command(name = "layerconf")]
#[command(version, about = "Inspect and check layered configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Number of parent directories searched for each path
    #[arg(
        long,
        value_name = "N",
        global = true,
        env = "LAYERCONF_WALK_DEPTH",
        default_value_t = 0
    )]
    pub depth: usize,

    /// Directory the search starts from (default: current directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub base_dir: Option<PathBuf>,

    /// Prefix of environment variables read for unresolved paths
    #[arg(long, value_name = "PREFIX", global = true, env = "LAYERCONF_ENV_PREFIX")]
    pub env_prefix: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Merge sources and print the result
    Show(ShowCommand),

    /// Check that required keys are set
    Check(CheckCommand),

    /// Print the file a path resolves to
    Locate(LocateCommand),

    /// Set keys in an existing configuration file
    Set(SetCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
