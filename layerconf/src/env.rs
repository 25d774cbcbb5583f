//! Environment variable sources and parsing.
//!
//! The loader never touches the process environment directly. It reads
//! through an injected [`EnvSource`], so tests and embedding programs can
//! substitute an in-memory [`MapEnv`]. Dotenv files are applied through the
//! same path.
//!
//! Field metadata decides which variables are read: a leaf is read from
//! `prefix + name`, where `name` comes from `#[config(env = "...")]` and the
//! prefix accumulates every `env_prefix` on the way down.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::hash::BuildHasher;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// A read-only view of environment variables.
///
/// # Examples
///
/// ```
/// use layerconf::{EnvSource, MapEnv};
///
/// let env = MapEnv::from_iter([("BASE_A", "1")]);
/// assert_eq!(env.var("BASE_A").as_deref(), Some("1"));
/// assert!(env.var("BASE_B").is_none());
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait EnvSource {
    /// The value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;

    /// Every variable, as `(name, value)` pairs.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The environment of the current process.
///
/// Variables whose name or value is not valid Unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// An in-memory environment.
///
/// # Examples
///
/// ```
/// use layerconf::{EnvSource, MapEnv};
///
/// let mut env = MapEnv::new();
/// env.set("APP_PORT", "8080");
/// assert_eq!(env.vars().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`MapEnv::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (k, v) in iter {
            env.set(k, v);
        }
        env
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }

    fn vars(&self) -> Vec<(String, String)> {
        (**self).vars()
    }
}

/// Populates a value from environment variables.
///
/// Leaves read the variable `prefix + name` when a name is given and the
/// variable is set; otherwise they are left untouched. Structs deriving
/// `FromEnv` forward to each field with the accumulated prefix.
pub trait FromEnv {
    /// Read this value from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] if a variable is set but its value
    /// cannot be parsed into the field's type.
    fn read_env(&mut self, env: &dyn EnvSource, prefix: &str, name: Option<&str>) -> Result<()>;
}

/// Parses a single environment variable value.
///
/// # Examples
///
/// ```
/// use layerconf::EnvValue;
///
/// assert_eq!(u16::parse_env("PORT", "8080").unwrap(), 8080);
/// assert!(bool::parse_env("DEBUG", "yes").unwrap());
/// assert_eq!(Vec::<u8>::parse_env("IDS", "1, 2,3").unwrap(), vec![1, 2, 3]);
/// assert!(u16::parse_env("PORT", "http").is_err());
/// ```
pub trait EnvValue: Sized {
    /// Parse `raw`, the value of variable `var`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] naming `var` if `raw` is invalid.
    fn parse_env(var: &str, raw: &str) -> Result<Self>;
}

/// Read a leaf from `prefix + name`, leaving it untouched if unset.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
pub fn read_leaf<T: EnvValue>(
    slot: &mut T,
    env: &dyn EnvSource,
    prefix: &str,
    name: Option<&str>,
) -> Result<()> {
    let Some(name) = name else {
        return Ok(());
    };

    let var = format!("{prefix}{name}");
    if let Some(raw) = env.var(&var) {
        *slot = T::parse_env(&var, &raw)?;
    }
    Ok(())
}

/// Parse a boolean value from a string.
///
/// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
fn parse_bool(var: &str, s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::Environment {
            var: var.into(),
            message: format!("Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"),
        }),
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|part| !part.is_empty())
}

macro_rules! env_value_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn parse_env(var: &str, raw: &str) -> Result<Self> {
                    raw.trim().parse().map_err(|e| Error::Environment {
                        var: var.into(),
                        message: format!("'{raw}': {e}"),
                    })
                }
            }
        )+
    };
}

env_value_from_str!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl EnvValue for bool {
    fn parse_env(var: &str, raw: &str) -> Result<Self> {
        parse_bool(var, raw)
    }
}

impl EnvValue for char {
    fn parse_env(var: &str, raw: &str) -> Result<Self> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::Environment {
                var: var.into(),
                message: format!("expected a single character, got '{raw}'"),
            }),
        }
    }
}

impl EnvValue for String {
    fn parse_env(_var: &str, raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }
}

impl EnvValue for PathBuf {
    fn parse_env(_var: &str, raw: &str) -> Result<Self> {
        Ok(PathBuf::from(raw))
    }
}

impl<T: EnvValue> EnvValue for Option<T> {
    fn parse_env(var: &str, raw: &str) -> Result<Self> {
        T::parse_env(var, raw).map(Some)
    }
}

impl<T: EnvValue> EnvValue for Vec<T> {
    fn parse_env(var: &str, raw: &str) -> Result<Self> {
        split_list(raw).map(|part| T::parse_env(var, part)).collect()
    }
}

/// Parse `key:value` pairs separated by commas.
fn parse_pairs<'a, V: EnvValue>(
    var: &'a str,
    raw: &'a str,
) -> impl Iterator<Item = Result<(String, V)>> + 'a {
    split_list(raw).map(move |part| {
        let (key, value) = part.split_once(':').ok_or_else(|| Error::Environment {
            var: var.into(),
            message: format!("expected key:value pairs, got '{part}'"),
        })?;
        Ok((key.trim().to_string(), V::parse_env(var, value.trim())?))
    })
}

impl<V: EnvValue, S: BuildHasher + Default> EnvValue for HashMap<String, V, S> {
    fn parse_env(var: &str, raw: &str) -> Result<Self> {
        parse_pairs(var, raw).collect()
    }
}

impl<V: EnvValue> EnvValue for BTreeMap<String, V> {
    fn parse_env(var: &str, raw: &str) -> Result<Self> {
        parse_pairs(var, raw).collect()
    }
}

/// An `Option` is read as one variable. Nested schemas are not recursed
/// into, so `Option<S>` with `S: FromEnv` does not implement this trait:
///
/// ```compile_fail
/// use layerconf::{FromEnv, Merge, Validate};
///
/// #[derive(Clone, Default, Merge, Validate, FromEnv)]
/// struct Tls {
///     #[config(env = "CERT")]
///     cert: String,
/// }
///
/// #[derive(Default, Merge, Validate, FromEnv)]
/// struct Server {
///     tls: Option<Tls>,
/// }
/// ```
impl<T: EnvValue> FromEnv for Option<T> {
    fn read_env(&mut self, env: &dyn EnvSource, prefix: &str, name: Option<&str>) -> Result<()> {
        read_leaf(self, env, prefix, name)
    }
}

impl<T: EnvValue> FromEnv for Vec<T> {
    fn read_env(&mut self, env: &dyn EnvSource, prefix: &str, name: Option<&str>) -> Result<()> {
        read_leaf(self, env, prefix, name)
    }
}

impl<V: EnvValue, S: BuildHasher + Default> FromEnv for HashMap<String, V, S> {
    fn read_env(&mut self, env: &dyn EnvSource, prefix: &str, name: Option<&str>) -> Result<()> {
        read_leaf(self, env, prefix, name)
    }
}

impl<V: EnvValue> FromEnv for BTreeMap<String, V> {
    fn read_env(&mut self, env: &dyn EnvSource, prefix: &str, name: Option<&str>) -> Result<()> {
        read_leaf(self, env, prefix, name)
    }
}

impl<T: FromEnv + ?Sized> FromEnv for Box<T> {
    fn read_env(&mut self, env: &dyn EnvSource, prefix: &str, name: Option<&str>) -> Result<()> {
        (**self).read_env(env, prefix, name)
    }
}


// Property-based tests for environment variable parsing
#[cfg(test)]
#[allow(unused_doc_comments)] // proptest! macro doesn't support doc comments
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Property: Boolean parsing should be case-insensitive
    proptest! {
        #[test]
        fn prop_bool_parsing_case_insensitive(
            word in prop::sample::select(vec!["true", "false", "yes", "no", "on", "off"]),
        ) {
            let lower = parse_bool("VAR", word).unwrap();
            let upper = parse_bool("VAR", &word.to_uppercase()).unwrap();
            prop_assert_eq!(lower, upper);
        }
    }

    /// Property: Every integer survives a round trip through its string form
    proptest! {
        #[test]
        fn prop_integer_parsing_roundtrip(value in any::<i64>()) {
            let parsed = i64::parse_env("VAR", &value.to_string()).unwrap();
            prop_assert_eq!(parsed, value);
        }
    }

    /// Property: Comma-separated lists preserve order and duplicates
    proptest! {
        #[test]
        fn prop_list_parsing_preserves_order(values in prop::collection::vec(any::<u16>(), 0..8)) {
            let raw = values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let parsed = Vec::<u16>::parse_env("VAR", &raw).unwrap();
            prop_assert_eq!(parsed, values);
        }
    }

    /// Property: Strings are taken verbatim
    proptest! {
        #[test]
        fn prop_string_verbatim(raw in ".*") {
            prop_assert_eq!(String::parse_env("VAR", &raw).unwrap(), raw);
        }
    }
}
