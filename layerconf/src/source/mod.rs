//! Locating and reading configuration sources.
//!
//! - [`resolver`]: turns a path hint into an existing file, walking up a
//!   bounded number of parent directories.
//! - [`format`]: detects a file's format from its name and reads or writes
//!   YAML, JSON, TOML and dotenv files.

pub mod format;
pub mod resolver;

pub use format::{read_file, serialize, write_file, FileFormat};
pub use resolver::{expand_tilde, SourceResolver, WalkResolver};

#[cfg(test)]
pub use resolver::MockSourceResolver;
