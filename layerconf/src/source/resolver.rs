//! Bounded upward search for configuration files.
//!
//! A path hint such as `config/app.yaml` is looked up in a base directory
//! first and then in each parent directory, up to a fixed number of levels.
//! Not finding a file is a normal outcome: the loader then falls back to the
//! environment for that hint.

use std::env;
use std::path::{Path, PathBuf};

/// Locates a concrete file for a path hint.
///
/// Implementations must be deterministic and free of side effects.
#[cfg_attr(test, mockall::automock)]
pub trait SourceResolver {
    /// Find an existing file for `hint`, searching at most `max_depth`
    /// levels above the starting point.
    fn resolve(&self, hint: &Path, max_depth: usize) -> Option<PathBuf>;
}

impl<R: SourceResolver + ?Sized> SourceResolver for &R {
    fn resolve(&self, hint: &Path, max_depth: usize) -> Option<PathBuf> {
        (**self).resolve(hint, max_depth)
    }
}

/// Resolves hints by walking up from a base directory.
///
/// - A leading `~` expands to the home directory.
/// - Absolute hints resolve to themselves when they name an existing file.
/// - Relative hints are joined onto the base directory, then onto each
///   parent in turn. `max_depth` counts the parents examined beyond the base,
///   so a depth of 0 only looks in the base directory.
///
/// # Examples
///
/// ```no_run
/// use layerconf::{SourceResolver, WalkResolver};
/// use std::path::Path;
///
/// let resolver = WalkResolver::new().with_base_dir("/srv/app/current");
/// // Checks /srv/app/current/app.yaml, /srv/app/app.yaml, /srv/app.yaml
/// let found = resolver.resolve(Path::new("app.yaml"), 2);
/// println!("{found:?}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct WalkResolver {
    base_dir: Option<PathBuf>,
}

impl WalkResolver {
    /// Create a resolver rooted at the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Search from `dir` instead of the current directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// The directory the walk starts from, made absolute when possible.
    fn start_dir(&self) -> Option<PathBuf> {
        let cwd = env::current_dir().ok();
        match (&self.base_dir, cwd) {
            (Some(base), _) if base.is_absolute() => Some(base.clone()),
            (Some(base), Some(cwd)) => Some(cwd.join(base)),
            (Some(base), None) => Some(base.clone()),
            (None, cwd) => cwd,
        }
    }
}

impl SourceResolver for WalkResolver {
    fn resolve(&self, hint: &Path, max_depth: usize) -> Option<PathBuf> {
        let hint = expand_tilde(hint);

        if hint.is_absolute() {
            return hint.is_file().then_some(hint);
        }

        let mut dir = self.start_dir()?;
        for _ in 0..=max_depth {
            let candidate = dir.join(&hint);
            if candidate.is_file() {
                log::debug!("resolved {} to {}", hint.display(), candidate.display());
                return Some(candidate);
            }
            if !dir.pop() {
                break;
            }
        }

        log::debug!(
            "no file found for {} within {max_depth} parent directories",
            hint.display()
        );
        None
    }
}

/// Expand a leading `~` to the home directory.
///
/// `~user` syntax and paths that are not valid UTF-8 are returned unchanged,
/// as is everything when the home directory cannot be determined.
///
/// # Examples
///
/// ```
/// use layerconf::source::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project/app.yaml"));
/// assert!(expanded.ends_with("project/app.yaml"));
///
/// assert_eq!(expand_tilde(Path::new("/absolute")), Path::new("/absolute"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(path_str) = path.to_str() else {
        return path.to_path_buf();
    };

    if !path_str.starts_with('~') {
        return path.to_path_buf();
    }

    let Some(home) = home::home_dir() else {
        return path.to_path_buf();
    };

    if path_str == "~" {
        home
    } else if let Some(rest) = path_str
        .strip_prefix("~/")
        .or_else(|| path_str.strip_prefix("~\\"))
    {
        home.join(rest)
    } else {
        path.to_path_buf()
    }
}
