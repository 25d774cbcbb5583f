//! Layered configuration loading.
//!
//! A load walks the path hints in order. Each hint that resolves to a file
//! is read into a fresh `T::default()`; each hint that does not is filled
//! from the environment instead. Every temporary instance is merged into an
//! accumulator with first-value-wins precedence, and the result is rejected
//! if any required field is still unset.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::env::{EnvSource, ProcessEnv};
use crate::error::{Error, Result};
use crate::source::{read_file, FileFormat, SourceResolver, WalkResolver};
use crate::ConfigSchema;

/// The ordered sources for one load.
///
/// Earlier paths take precedence over later ones. `walk_depth` bounds the
/// upward directory search for every path.
///
/// # Examples
///
/// ```
/// use layerconf::LoadOptions;
///
/// let options = LoadOptions::new([".env.local.yaml", ".env.yaml"]).with_walk_depth(2);
/// assert_eq!(options.paths.len(), 2);
/// assert_eq!(options.walk_depth, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Path hints, highest precedence first.
    pub paths: Vec<PathBuf>,
    /// Number of parent directories searched beyond the base for each hint.
    pub walk_depth: usize,
}

impl LoadOptions {
    /// Create options for `paths` with a walk depth of 0.
    #[must_use]
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            walk_depth: 0,
        }
    }

    /// Append a lower-precedence path hint.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Set the walk depth.
    #[must_use]
    pub fn with_walk_depth(mut self, depth: usize) -> Self {
        self.walk_depth = depth;
        self
    }
}

/// Where a layer's values came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A file that the hint resolved to.
    File {
        /// The resolved file.
        path: PathBuf,
        /// The format it was read as.
        format: FileFormat,
    },
    /// The environment, used because the hint did not resolve.
    Environment,
}

/// One merged layer, in load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    /// The hint as given in [`LoadOptions::paths`].
    pub hint: PathBuf,
    /// What the hint was read from.
    pub kind: SourceKind,
}

impl fmt::Display for LoadedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SourceKind::File { path, format } => write!(
                f,
                "{} -> {} ({format})",
                self.hint.display(),
                path.display()
            ),
            SourceKind::Environment => write!(f, "{} -> environment", self.hint.display()),
        }
    }
}

/// Loads configuration from layered sources.
///
/// The resolver and the environment are injected, so a loader can be
/// pointed at a different directory or an in-memory environment.
///
/// # Examples
///
/// ```no_run
/// use layerconf::{ConfigLoader, Document, LoadOptions, WalkResolver};
///
/// let loader = ConfigLoader::new()
///     .with_resolver(WalkResolver::new().with_base_dir("/srv/app"))
///     .with_env_prefix("APP_");
///
/// let options = LoadOptions::new([".env.local.yaml", ".env.yaml"]);
/// let config: Document = loader.load(&options).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader<R = WalkResolver, E = ProcessEnv> {
    resolver: R,
    env: E,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a loader that searches from the current directory and falls
    /// back to the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R, E> ConfigLoader<R, E> {
    /// Use `resolver` to locate files.
    #[must_use]
    pub fn with_resolver<R2: SourceResolver>(self, resolver: R2) -> ConfigLoader<R2, E> {
        ConfigLoader {
            resolver,
            env: self.env,
            env_prefix: self.env_prefix,
        }
    }

    /// Read environment fallbacks from `env`.
    #[must_use]
    pub fn with_env<E2: EnvSource>(self, env: E2) -> ConfigLoader<R, E2> {
        ConfigLoader {
            resolver: self.resolver,
            env,
            env_prefix: self.env_prefix,
        }
    }

    /// Prepend `prefix` to every environment variable name, including the
    /// names read from dotenv files.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// The configured environment variable prefix.
    #[must_use]
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }
}

impl<R: SourceResolver, E: EnvSource> ConfigLoader<R, E> {
    /// Load and validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`], [`Error::Parse`] or
    /// [`Error::UnsupportedFormat`] if a resolved file cannot be read,
    /// [`Error::Environment`] if an environment value is invalid, and
    /// [`Error::MissingFields`] listing every required field that is still
    /// unset after all sources are merged.
    pub fn load<T: ConfigSchema>(&self, options: &LoadOptions) -> Result<T> {
        self.load_with_sources(options).map(|(config, _)| config)
    }

    /// Like [`load`](Self::load), also reporting where each layer came from.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_sources<T: ConfigSchema>(
        &self,
        options: &LoadOptions,
    ) -> Result<(T, Vec<LoadedSource>)> {
        let (config, sources) = self.merge_sources::<T>(options)?;

        let missing = config.empty_required_fields("");
        if !missing.is_empty() {
            log::debug!("{} required field(s) unset", missing.len());
            return Err(Error::MissingFields { fields: missing });
        }

        Ok((config, sources))
    }

    /// Read and merge every source without checking required fields.
    ///
    /// # Errors
    ///
    /// Returns the read and environment errors of [`load`](Self::load).
    pub fn merge_sources<T: ConfigSchema>(
        &self,
        options: &LoadOptions,
    ) -> Result<(T, Vec<LoadedSource>)> {
        let mut config = T::default();
        let mut sources = Vec::with_capacity(options.paths.len());

        for hint in &options.paths {
            let (layer, kind) = self.read_layer::<T>(hint, options.walk_depth)?;
            config.merge_from(&layer);
            let source = LoadedSource {
                hint: hint.clone(),
                kind,
            };
            log::debug!("merged layer {source}");
            sources.push(source);
        }

        Ok((config, sources))
    }

    fn read_layer<T: ConfigSchema>(&self, hint: &Path, walk_depth: usize) -> Result<(T, SourceKind)> {
        if let Some(path) = self.resolver.resolve(hint, walk_depth) {
            let format = FileFormat::from_path(&path)?;
            log::debug!("reading {} as {format}", path.display());
            let layer = read_file::<T>(&path, &self.env_prefix)?;
            return Ok((layer, SourceKind::File { path, format }));
        }

        log::debug!(
            "{} not found, reading environment with prefix '{}'",
            hint.display(),
            self.env_prefix
        );
        let mut layer = T::default();
        layer.read_env(&self.env, &self.env_prefix, None)?;
        Ok((layer, SourceKind::Environment))
    }
}

/// Load a configuration using the current directory and process
/// environment.
///
/// # Errors
///
/// See [`ConfigLoader::load`].
///
/// # Examples
///
/// ```no_run
/// use layerconf::{get_config, Document, LoadOptions};
///
/// let options = LoadOptions::new(["config.yaml"]).with_walk_depth(3);
/// let config: Document = get_config(&options).unwrap();
/// println!("{:?}", config.get("server.port"));
/// ```
pub fn get_config<T: ConfigSchema>(options: &LoadOptions) -> Result<T> {
    ConfigLoader::new().load(options)
}
