#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # layerconf
//!
//! Layered configuration loading.
//!
//! A configuration is assembled from an ordered list of sources. Each path
//! hint is resolved to a file by walking up a bounded number of parent
//! directories; a hint that resolves nowhere is filled from the environment
//! instead. Sources are merged field by field with first-value-wins
//! precedence, and the result is rejected if any required field is unset.
//!
//! ## Core Types
//!
//! - [`Merge`], [`Validate`] and [`FromEnv`]: the capabilities a schema
//!   needs, derivable with `#[derive(Merge, Validate, FromEnv)]`
//! - [`ConfigLoader`], [`LoadOptions`] and [`get_config`]: loading
//! - [`ConfigSaver`] and [`save_config`]: writing back to an existing file
//! - [`SourceResolver`] and [`EnvSource`]: injectable file lookup and
//!   environment access
//! - [`Document`]: a schemaless tree for configurations without a Rust type
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use layerconf::{ConfigLoader, FromEnv, LoadOptions, MapEnv, Merge, Validate, WalkResolver};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize, Merge, Validate, FromEnv)]
//! #[serde(default)]
//! struct Server {
//!     #[config(required, env = "HOST")]
//!     host: String,
//!     #[config(env = "PORT")]
//!     port: u16,
//! }
//!
//! let env = MapEnv::from_iter([("APP_HOST", "localhost"), ("APP_PORT", "8080")]);
//! let loader = ConfigLoader::new()
//!     .with_resolver(WalkResolver::new().with_base_dir("/nonexistent"))
//!     .with_env(env)
//!     .with_env_prefix("APP_");
//!
//! let server: Server = loader.load(&LoadOptions::new(["server.yaml"])).unwrap();
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.port, 8080);
//! ```

// Lets the derives' `::layerconf::` paths resolve inside this crate.
extern crate self as layerconf;

pub mod document;
pub mod env;
pub mod error;
mod leaf;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod saver;
pub mod source;
pub mod validate;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_util;

// Re-export key types at crate root for convenience
pub use document::Document;
pub use env::{EnvSource, EnvValue, FromEnv, MapEnv, ProcessEnv};
pub use error::{Error, Result};
pub use layerconf_derive::{FromEnv, Merge, Validate};
pub use loader::{get_config, ConfigLoader, LoadOptions, LoadedSource, SourceKind};
pub use logging::{init_logger, LogLevel, Logger};
pub use merge::Merge;
pub use saver::{save_config, ConfigSaver};
pub use source::{FileFormat, SourceResolver, WalkResolver};
pub use validate::Validate;

/// A type that can be loaded as a layered configuration.
///
/// Implemented automatically for every type with the required capabilities.
/// The default value is the starting point of every load and the zero value
/// that merging and validation compare against.
pub trait ConfigSchema: Default + Merge + Validate + FromEnv + serde::de::DeserializeOwned {}

impl<T> ConfigSchema for T where T: Default + Merge + Validate + FromEnv + serde::de::DeserializeOwned {}
