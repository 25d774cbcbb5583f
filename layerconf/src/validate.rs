//! Required-field validation.
//!
//! After every source has been merged, the loader asks the accumulator for
//! the dotted paths of every required field that is still zero-valued. The
//! report is complete: all unset fields are listed, not just the first.

use std::collections::{BTreeMap, HashMap};

use crate::merge::is_zero;

/// Reports required fields that are still unset.
///
/// Leaves push their own path when `required` is set and they hold their
/// zero value. Structs deriving `Validate` visit each field with the field's
/// dotted path and its own `required` flag.
///
/// # Examples
///
/// ```
/// use layerconf::Validate;
///
/// let mut out = Vec::new();
/// String::new().collect_empty("server.host", true, &mut out);
/// 8080u16.collect_empty("server.port", true, &mut out);
/// assert_eq!(out, vec!["server.host".to_string()]);
/// ```
pub trait Validate {
    /// Append the paths of unset required fields under `path` to `out`.
    fn collect_empty(&self, path: &str, required: bool, out: &mut Vec<String>);

    /// Dotted paths of every unset required field, relative to `prefix`.
    fn empty_required_fields(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_empty(prefix, false, &mut out);
        out
    }
}

/// Join a parent path and a field name with a dot.
///
/// # Examples
///
/// ```
/// use layerconf::validate::join_path;
///
/// assert_eq!(join_path("", "base"), "base");
/// assert_eq!(join_path("base", "a"), "base.a");
/// ```
#[must_use]
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

impl<T> Validate for Option<T> {
    fn collect_empty(&self, path: &str, required: bool, out: &mut Vec<String>) {
        if required && self.is_none() {
            out.push(path.to_string());
        }
    }
}

impl<T> Validate for Vec<T> {
    fn collect_empty(&self, path: &str, required: bool, out: &mut Vec<String>) {
        if required && self.is_empty() {
            out.push(path.to_string());
        }
    }
}

impl<K, V, S> Validate for HashMap<K, V, S> {
    fn collect_empty(&self, path: &str, required: bool, out: &mut Vec<String>) {
        if required && self.is_empty() {
            out.push(path.to_string());
        }
    }
}

impl<K, V> Validate for BTreeMap<K, V> {
    fn collect_empty(&self, path: &str, required: bool, out: &mut Vec<String>) {
        if required && self.is_empty() {
            out.push(path.to_string());
        }
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn collect_empty(&self, path: &str, required: bool, out: &mut Vec<String>) {
        (**self).collect_empty(path, required, out);
    }
}

/// Push `path` if `required` and `value` is zero-valued.
///
/// Used by leaf implementations generated with [`leaf!`](crate::leaf).
pub fn check_leaf<T: Default + PartialEq>(
    value: &T,
    path: &str,
    required: bool,
    out: &mut Vec<String>,
) {
    if required && is_zero(value) {
        out.push(path.to_string());
    }
}
