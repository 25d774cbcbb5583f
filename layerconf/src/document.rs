//! Schemaless configuration documents.
//!
//! A [`Document`] wraps a [`serde_json::Value`] tree and satisfies the same
//! traits as a derived schema, so the loader can merge arbitrary YAML, JSON,
//! TOML and dotenv files without a compile-time type:
//!
//! - Objects merge key by key, recursively. A key missing from the
//!   destination counts as unset.
//! - Every other value is a leaf whose zero values are `null`, `false`, `0`,
//!   `""` and `[]`.
//! - Environment variables `PREFIX` + `A__B` become the key path `a.b`. An
//!   empty prefix reads nothing, and names with an empty segment (`A____B`)
//!   are ignored.
//!
//! # Examples
//!
//! ```
//! use layerconf::{Document, Merge};
//! use serde_json::json;
//!
//! let mut doc = Document::from(json!({"base": {"a": 1}}));
//! doc.merge_from(&Document::from(json!({"base": {"a": 9, "b": "2"}})));
//! assert_eq!(doc.get("base.a"), Some(&json!(1)));
//! assert_eq!(doc.get("base.b"), Some(&json!("2")));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::env::{EnvSource, FromEnv};
use crate::error::Result;
use crate::merge::Merge;
use crate::validate::Validate;

/// Separator between nesting levels in environment variable names.
pub const ENV_NESTING_SEPARATOR: &str = "__";

/// A schemaless configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    /// An empty document (`null`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the underlying value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the document, returning the underlying value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Look up a dotted key path such as `base.a`.
    ///
    /// An empty path returns the whole document.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.0);
        }
        path.split('.')
            .try_fold(&self.0, |value, key| value.as_object()?.get(key))
    }

    /// Set a dotted key path, creating intermediate objects as needed.
    ///
    /// Non-object values on the way are replaced by objects.
    pub fn set(&mut self, path: &str, value: Value) {
        let mut current = &mut self.0;
        for key in path.split('.') {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let Value::Object(map) = current else {
                return;
            };
            current = map.entry(key.to_string()).or_insert(Value::Null);
        }
        *current = value;
    }

    /// The subset of `paths` whose values are missing or zero-valued.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerconf::Document;
    /// use serde_json::json;
    ///
    /// let doc = Document::from(json!({"base": {"a": 1, "b": ""}}));
    /// assert_eq!(doc.missing(&["base.a", "base.b", "foo.bar"]), vec!["base.b", "foo.bar"]);
    /// ```
    #[must_use]
    pub fn missing<S: AsRef<str>>(&self, paths: &[S]) -> Vec<String> {
        paths
            .iter()
            .map(AsRef::as_ref)
            .filter(|path| self.get(path).map_or(true, is_zero_value))
            .map(ToString::to_string)
            .collect()
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.0
    }
}

/// Whether a JSON value counts as unset.
#[must_use]
pub fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

fn merge_value(dst: &mut Value, src: &Value) {
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, src_value) in src_map {
                match dst_map.get_mut(key) {
                    Some(dst_value) => merge_value(dst_value, src_value),
                    None => {
                        dst_map.insert(key.clone(), src_value.clone());
                    }
                }
            }
        }
        (dst, src) => {
            if is_zero_value(dst) {
                dst.clone_from(src);
            }
        }
    }
}

/// Interpret a raw environment value as a JSON scalar.
///
/// Booleans and numbers keep their type, everything else is a string.
///
/// # Examples
///
/// ```
/// use layerconf::document::parse_scalar;
/// use serde_json::json;
///
/// assert_eq!(parse_scalar("8080"), json!(8080));
/// assert_eq!(parse_scalar("true"), json!(true));
/// assert_eq!(parse_scalar("localhost"), json!("localhost"));
/// ```
#[must_use]
pub fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value @ (Value::Bool(_) | Value::Number(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

impl Merge for Document {
    fn merge_from(&mut self, other: &Self) {
        merge_value(&mut self.0, &other.0);
    }
}

// Documents carry no field metadata; required paths are checked with
// `Document::missing`.
impl Validate for Document {
    fn collect_empty(&self, _path: &str, _required: bool, _out: &mut Vec<String>) {}
}

impl FromEnv for Document {
    fn read_env(&mut self, env: &dyn EnvSource, prefix: &str, _name: Option<&str>) -> Result<()> {
        if prefix.is_empty() {
            return Ok(());
        }

        let mut vars = env.vars();
        vars.sort();
        for (key, raw) in vars {
            let Some(rest) = key.strip_prefix(prefix) else {
                continue;
            };
            let segments: Vec<String> = rest
                .split(ENV_NESTING_SEPARATOR)
                .map(str::to_lowercase)
                .collect();
            if segments.iter().any(String::is_empty) {
                log::debug!("ignoring {key}: empty key segment");
                continue;
            }
            self.set(&segments.join("."), parse_scalar(&raw));
        }
        Ok(())
    }
}
