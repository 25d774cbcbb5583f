//! Error types for the layerconf library.
//!
//! This module provides the error hierarchy for loading, validating and
//! saving configuration, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::source::FileFormat;

/// Result type alias for operations that may fail with a layerconf error.
///
/// # Examples
///
/// ```
/// use layerconf::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the layerconf library.
///
/// Every variant is terminal for the call that produced it: nothing is
/// retried and no partially loaded configuration is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// A resolved configuration file could not be read.
    #[error("failed to read config from {}: {source}", path.display())]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A resolved configuration file could not be parsed.
    #[error("failed to read config from {}: invalid {format}: {message}", path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The format the file was parsed as.
        format: FileFormat,
        /// The parser's description of the problem.
        message: String,
    },

    /// The file extension does not map to a supported format.
    #[error("unsupported config file format: {}", path.display())]
    UnsupportedFormat {
        /// The offending file.
        path: PathBuf,
    },

    /// An environment variable held a value that could not be parsed.
    #[error("failed to read environment variables: invalid value for '{var}': {message}")]
    Environment {
        /// The full name of the variable.
        var: String,
        /// A description of the parse failure.
        message: String,
    },

    /// Required fields were still unset after merging every source.
    #[error("missing required configuration fields: {}", fields.join(", "))]
    MissingFields {
        /// Dotted paths of every unset required field.
        fields: Vec<String>,
    },

    /// No existing file could be found for a save target.
    #[error("config path not found: {}", hint.display())]
    PathNotFound {
        /// The path hint that failed to resolve.
        hint: PathBuf,
    },

    /// A configuration value could not be serialized.
    #[error("failed to serialize config as {format}: {message}")]
    Serialize {
        /// The target format.
        format: FileFormat,
        /// The serializer's description of the problem.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error indicates a save target could not be resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerconf::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { hint: PathBuf::from("app.yaml") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// The unset required fields, if this is a validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerconf::Error;
    ///
    /// let err = Error::MissingFields { fields: vec!["base.b".to_string()] };
    /// assert_eq!(err.missing_fields(), Some(&["base.b".to_string()][..]));
    /// ```
    #[must_use]
    pub fn missing_fields(&self) -> Option<&[String]> {
        match self {
            Self::MissingFields { fields } => Some(fields),
            _ => None,
        }
    }
}
