//! Layered merging with first-source-wins precedence.
//!
//! Merging combines a partially populated configuration into an
//! accumulator, one field at a time:
//!
//! - Nested structures recurse, so overlapping sub-trees are resolved
//!   leaf-by-leaf rather than block-by-block.
//! - A leaf takes the other value only while it still holds its zero value.
//!   Once set, later sources never overwrite it.
//!
//! A leaf explicitly set to its zero value (`0`, `false`, `""`) cannot be told
//! apart from an unset one, so a later non-zero source still wins over it.
//!
//! # Examples
//!
//! ```
//! use layerconf::Merge;
//!
//! let mut port = 0u16;
//! port.merge_from(&8080);
//! assert_eq!(port, 8080);
//!
//! // First value wins
//! port.merge_from(&9090);
//! assert_eq!(port, 8080);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Merges another instance of the same type into `self`.
///
/// Implemented for every leaf type the crate knows about, for `Option`,
/// `Vec`, maps and `Box`, and derivable for structs with
/// `#[derive(Merge)]`.
///
/// # Examples
///
/// ```
/// use layerconf::Merge;
///
/// let mut name: Option<String> = None;
/// name.merge_from(&Some("primary".to_string()));
/// name.merge_from(&Some("fallback".to_string()));
/// assert_eq!(name.as_deref(), Some("primary"));
/// ```
pub trait Merge {
    /// Combine `other` into `self` without touching `other`.
    fn merge_from(&mut self, other: &Self);
}

/// Whether `value` equals its type's default, i.e. counts as unset.
///
/// # Examples
///
/// ```
/// use layerconf::merge::is_zero;
///
/// assert!(is_zero(&0i32));
/// assert!(is_zero(&String::new()));
/// assert!(!is_zero(&true));
/// ```
#[must_use]
pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Merge a sequence of layers, earliest first, into a fresh value.
///
/// # Examples
///
/// ```
/// use layerconf::merge::merge_all;
///
/// let merged: u32 = merge_all([0, 3, 7].iter());
/// assert_eq!(merged, 3);
/// ```
pub fn merge_all<'a, T, I>(layers: I) -> T
where
    T: Default + Merge + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut result = T::default();
    for layer in layers {
        result.merge_from(layer);
    }
    result
}

// `Option` is a leaf: a `Some` destination is kept even when its contents
// are themselves partially empty. Environment reading follows the same rule,
// so `FromEnv` is only available for `Option<T: EnvValue>`; an optional
// sub-section (`Option<Tls>`) has to be a plain `Tls` field to be read from
// the environment.
impl<T: Clone> Merge for Option<T> {
    fn merge_from(&mut self, other: &Self) {
        if self.is_none() {
            self.clone_from(other);
        }
    }
}

impl<T: Clone> Merge for Vec<T> {
    fn merge_from(&mut self, other: &Self) {
        if self.is_empty() {
            self.clone_from(other);
        }
    }
}

impl<K, V, S> Merge for HashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn merge_from(&mut self, other: &Self) {
        if self.is_empty() {
            self.clone_from(other);
        }
    }
}

impl<K: Clone + Ord, V: Clone> Merge for BTreeMap<K, V> {
    fn merge_from(&mut self, other: &Self) {
        if self.is_empty() {
            self.clone_from(other);
        }
    }
}

impl<T: Merge + ?Sized> Merge for Box<T> {
    fn merge_from(&mut self, other: &Self) {
        (**self).merge_from(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{Base, CustomConfig, Foo};
    use std::path::PathBuf;

    #[test]
    fn test_zero_leaf_takes_source() {
        let mut value = String::new();
        value.merge_from(&"set".to_string());
        assert_eq!(value, "set");
    }

    #[test]
    fn test_first_value_wins() {
        let mut value = 1i64;
        value.merge_from(&2);
        assert_eq!(value, 1);

        let mut path = PathBuf::from("/first");
        path.merge_from(&PathBuf::from("/second"));
        assert_eq!(path, PathBuf::from("/first"));
    }

    #[test]
    fn test_explicit_zero_is_overwritten() {
        let mut flag = false;
        flag.merge_from(&false);
        assert!(!flag);
        flag.merge_from(&true);
        assert!(flag);
    }

    #[test]
    fn test_option_is_a_leaf() {
        let mut value: Option<u16> = Some(0);
        value.merge_from(&Some(8080));
        assert_eq!(value, Some(0));

        let mut value: Option<u16> = None;
        value.merge_from(&None);
        value.merge_from(&Some(8080));
        assert_eq!(value, Some(8080));
    }

    #[test]
    fn test_collections_replaced_only_when_empty() {
        let mut list: Vec<u8> = vec![];
        list.merge_from(&vec![1, 2]);
        list.merge_from(&vec![3]);
        assert_eq!(list, vec![1, 2]);

        let mut map: BTreeMap<String, String> = BTreeMap::new();
        map.merge_from(&BTreeMap::from([("a".to_string(), "1".to_string())]));
        map.merge_from(&BTreeMap::from([("b".to_string(), "2".to_string())]));
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("a"));
    }

    #[test]
    fn test_boxed_value_delegates() {
        let mut boxed = Box::new(0u8);
        boxed.merge_from(&Box::new(5));
        assert_eq!(*boxed, 5);
    }

    #[test]
    fn test_nested_struct_merged_leaf_by_leaf() {
        let mut target = CustomConfig {
            base: Base {
                a: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        let source = CustomConfig {
            base: Base {
                a: 9,
                b: "2".to_string(),
                ..Default::default()
            },
            foo: Foo {
                bar: "4".to_string(),
            },
        };

        target.merge_from(&source);
        assert_eq!(target.base.a, 1);
        assert_eq!(target.base.b, "2");
        assert_eq!(target.foo.bar, "4");
    }

    #[test]
    fn test_source_not_mutated() {
        let mut target = CustomConfig::default();
        let source = CustomConfig {
            base: Base {
                a: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        let snapshot = source.clone();
        target.merge_from(&source);
        assert_eq!(source, snapshot);
    }

    #[test]
    fn test_merge_all_respects_order() {
        let layers = [
            Base {
                a: 1,
                ..Default::default()
            },
            Base {
                a: 2,
                b: "two".to_string(),
                ..Default::default()
            },
        ];
        let merged: Base = merge_all(layers.iter());
        assert_eq!(merged.a, 1);
        assert_eq!(merged.b, "two");
    }
}
