//! File formats and the readers and writers for them.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::env::MapEnv;
use crate::error::{Error, Result};
use crate::ConfigSchema;

/// A supported configuration file format.
///
/// # Examples
///
/// ```
/// use layerconf::FileFormat;
/// use std::path::Path;
///
/// assert_eq!(FileFormat::from_path(Path::new("app.yml")).unwrap(), FileFormat::Yaml);
/// assert_eq!(FileFormat::from_path(Path::new(".env.local")).unwrap(), FileFormat::Dotenv);
/// assert_eq!(FileFormat::from_path(Path::new(".env.json")).unwrap(), FileFormat::Json);
/// assert!(FileFormat::from_path(Path::new("app.ini")).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
    /// `.toml`
    Toml,
    /// `KEY=value` lines, in `.env`, `.env.*` or `*.env` files
    Dotenv,
}

impl FileFormat {
    /// Detect the format from a file's name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] when no format matches.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => return Ok(Self::Yaml),
            Some("json") => return Ok(Self::Json),
            Some("toml") => return Ok(Self::Toml),
            Some("env") => return Ok(Self::Dotenv),
            _ => {}
        }

        let is_dotenv = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(".env"));
        if is_dotenv {
            Ok(Self::Dotenv)
        } else {
            Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "YAML"),
            Self::Json => write!(f, "JSON"),
            Self::Toml => write!(f, "TOML"),
            Self::Dotenv => write!(f, "dotenv"),
        }
    }
}

/// Read `path` into a fresh `T::default()`.
///
/// Dotenv files are applied through [`FromEnv`](crate::FromEnv), with `env_prefix`
/// prepended to every variable name, exactly like the process environment.
/// A file holding only whitespace yields `T::default()`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for an unknown extension,
/// [`Error::Read`] if the file cannot be read and [`Error::Parse`] if its
/// contents are invalid for the format.
pub fn read_file<T: ConfigSchema>(path: &Path, env_prefix: &str) -> Result<T> {
    let format = FileFormat::from_path(path)?;
    let contents = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        log::debug!("{} is empty", path.display());
        return Ok(T::default());
    }

    let parse_error = |message: String| Error::Parse {
        path: path.to_path_buf(),
        format,
        message,
    };

    match format {
        FileFormat::Yaml => serde_yaml::from_str(&contents).map_err(|e| parse_error(e.to_string())),
        FileFormat::Json => serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string())),
        FileFormat::Toml => toml::from_str(&contents).map_err(|e| parse_error(e.message().to_string())),
        FileFormat::Dotenv => {
            let env = parse_dotenv(&contents).map_err(parse_error)?;
            let mut value = T::default();
            value.read_env(&env, env_prefix, None)?;
            Ok(value)
        }
    }
}

/// Parse dotenv text without touching the process environment.
fn parse_dotenv(contents: &str) -> std::result::Result<MapEnv, String> {
    dotenvy::from_read_iter(contents.as_bytes())
        .map(|item| item.map_err(|e| e.to_string()))
        .collect()
}

/// Serialize `value` in `format`.
///
/// JSON is pretty-printed. Every output ends with a newline.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if the value cannot be represented in the
/// format. Dotenv output is not supported.
pub fn serialize<T: Serialize + ?Sized>(value: &T, format: FileFormat) -> Result<String> {
    let serialize_error = |message: String| Error::Serialize { format, message };

    let mut output = match format {
        FileFormat::Yaml => serde_yaml::to_string(value).map_err(|e| serialize_error(e.to_string()))?,
        FileFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
        }
        FileFormat::Toml => {
            toml::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
        }
        FileFormat::Dotenv => {
            return Err(serialize_error("dotenv output is not supported".to_string()));
        }
    };

    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Replace the contents of `path` with `value`, in the format implied by
/// its extension.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for dotenv or unknown extensions,
/// [`Error::Serialize`] if serialization fails and [`Error::Io`] if the
/// write fails.
pub fn write_file<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let format = FileFormat::from_path(path)?;
    if format == FileFormat::Dotenv {
        return Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let contents = serialize(value, format)?;
    fs::write(path, contents)?;
    Ok(())
}
