//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including building the loader from global options and output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use layerconf::source::serialize;
use layerconf::{ConfigLoader, Document, FileFormat, LoadOptions, ProcessEnv, WalkResolver};
use serde_json::{json, Value};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Number of parent directories searched for each path.
    pub depth: usize,

    /// Directory the search starts from.
    pub base_dir: Option<PathBuf>,

    /// Prefix of environment variables read for unresolved paths.
    pub env_prefix: Option<String>,
}

/// Output format for printed documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// YAML output
    #[default]
    Yaml,
    /// Pretty-printed JSON output
    Json,
    /// TOML output
    Toml,
}

impl From<OutputFormat> for FileFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => FileFormat::Yaml,
            OutputFormat::Json => FileFormat::Json,
            OutputFormat::Toml => FileFormat::Toml,
        }
    }
}

/// Build the resolver for the global options.
pub fn resolver(global: &GlobalOptions) -> WalkResolver {
    match &global.base_dir {
        Some(dir) => WalkResolver::new().with_base_dir(dir),
        None => WalkResolver::new(),
    }
}

/// Build the loader for the global options.
pub fn loader(global: &GlobalOptions) -> ConfigLoader<WalkResolver, ProcessEnv> {
    ConfigLoader::new()
        .with_resolver(resolver(global))
        .with_env_prefix(global.env_prefix.clone().unwrap_or_default())
}

/// Build load options from positional path hints.
pub fn load_options(paths: &[PathBuf], global: &GlobalOptions) -> Result<LoadOptions, CliError> {
    if paths.is_empty() {
        return Err(CliError::InvalidArguments(
            "at least one configuration path is required".to_string(),
        ));
    }
    Ok(LoadOptions::new(paths.iter().cloned()).with_walk_depth(global.depth))
}

/// Render a document in the requested format.
///
/// A document with no values renders as an empty mapping.
pub fn render(doc: &Document, format: OutputFormat) -> Result<String, CliError> {
    let value = match doc.as_value() {
        Value::Null => json!({}),
        other => other.clone(),
    };
    Ok(serialize(&value, format.into())?)
}

/// Split a `KEY=VALUE` assignment.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), CliError> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        CliError::InvalidArguments(format!("expected KEY=VALUE, got '{raw}'"))
    })?;
    let key = key.trim();
    if key.is_empty() || key.split('.').any(str::is_empty) {
        return Err(CliError::InvalidArguments(format!("invalid key '{key}'")));
    }
    Ok((key.to_string(), layerconf::document::parse_scalar(value)))
}
