//! Build script for layerconf-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("layerconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and check layered configuration")
        .long_about(
            "Merge configuration files and environment variables with first-source-wins precedence",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("depth")
                .long("depth")
                .help("Number of parent directories searched for each path")
                .value_name("N")
                .global(true)
                .env("LAYERCONF_WALK_DEPTH"),
        )
        .arg(
            Arg::new("base-dir")
                .long("base-dir")
                .help("Directory the search starts from (default: current directory)")
                .value_name("PATH")
                .global(true),
        )
        .arg(
            Arg::new("env-prefix")
                .long("env-prefix")
                .help("Prefix of environment variables read for unresolved paths")
                .value_name("PREFIX")
                .global(true)
                .env("LAYERCONF_ENV_PREFIX"),
        )
        .subcommands(vec![
            Command::new("show")
                .about("Merge sources and print the result")
                .long_about("Merge every source in order and print the merged document"),
            Command::new("check")
                .about("Check that required keys are set")
                .long_about("Merge every source and fail if any required key is unset"),
            Command::new("locate")
                .about("Print the file a path resolves to")
                .long_about("Resolve a path by walking up parent directories"),
            Command::new("set")
                .about("Set keys in an existing configuration file")
                .long_about("Update keys in the file a path resolves to, keeping its format"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("layerconf.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
