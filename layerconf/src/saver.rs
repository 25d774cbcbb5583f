//! Writing a configuration back to an existing file.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::source::{write_file, SourceResolver, WalkResolver};

/// Saves configurations to files located with a [`SourceResolver`].
///
/// Only existing files are replaced; a hint that does not resolve fails
/// with [`Error::PathNotFound`].
#[derive(Debug, Clone, Default)]
pub struct ConfigSaver<R = WalkResolver> {
    resolver: R,
}

impl ConfigSaver {
    /// Create a saver that searches from the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: SourceResolver> ConfigSaver<R> {
    /// Create a saver that locates files with `resolver`.
    #[must_use]
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    /// Serialize `value` into the file `hint` resolves to.
    ///
    /// The format follows the resolved file's extension. Returns the path
    /// that was written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if no file is found,
    /// [`Error::UnsupportedFormat`] for dotenv or unknown extensions,
    /// [`Error::Serialize`] if the value cannot be represented in the format
    /// and [`Error::Io`] if the write fails.
    pub fn save<T: Serialize + ?Sized>(
        &self,
        value: &T,
        hint: &Path,
        walk_depth: usize,
    ) -> Result<PathBuf> {
        let path = self
            .resolver
            .resolve(hint, walk_depth)
            .ok_or_else(|| Error::PathNotFound {
                hint: hint.to_path_buf(),
            })?;

        write_file(value, &path)?;
        log::debug!("saved config to {}", path.display());
        Ok(path)
    }
}

/// Save `value` to the file `hint` resolves to from the current directory.
///
/// # Errors
///
/// See [`ConfigSaver::save`].
///
/// # Examples
///
/// ```no_run
/// use layerconf::{save_config, Document};
/// use serde_json::json;
/// use std::path::Path;
///
/// let doc = Document::from(json!({"server": {"port": 8080}}));
/// let written = save_config(&doc, Path::new("config.yaml"), 2).unwrap();
/// println!("wrote {}", written.display());
/// ```
pub fn save_config<T: Serialize + ?Sized>(
    value: &T,
    hint: &Path,
    walk_depth: usize,
) -> Result<PathBuf> {
    ConfigSaver::new().save(value, hint, walk_depth)
}
