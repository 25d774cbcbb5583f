//! Leaf field support.
//!
//! A leaf is a value that is merged as a whole: it takes the other value
//! while it is zero-valued and is otherwise kept. The [`leaf!`](crate::leaf)
//! macro implements [`Merge`](crate::Merge), [`Validate`](crate::Validate)
//! and [`FromEnv`](crate::FromEnv) for such types. The crate applies it to
//! every primitive; schema authors apply it to their own enums and newtypes.
//!
//! # Examples
//!
//! ```
//! use layerconf::{EnvValue, Merge};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! enum Mode {
//!     #[default]
//!     Unset,
//!     Fast,
//! }
//!
//! impl EnvValue for Mode {
//!     fn parse_env(var: &str, raw: &str) -> layerconf::Result<Self> {
//!         match raw {
//!             "fast" => Ok(Mode::Fast),
//!             _ => Err(layerconf::Error::Environment {
//!                 var: var.to_string(),
//!                 message: format!("unknown mode '{raw}'"),
//!             }),
//!         }
//!     }
//! }
//!
//! layerconf::leaf!(Mode);
//!
//! let mut mode = Mode::Unset;
//! mode.merge_from(&Mode::Fast);
//! assert_eq!(mode, Mode::Fast);
//! ```

use std::path::PathBuf;

/// Implement the leaf behaviour of `Merge`, `Validate` and `FromEnv`.
///
/// Each type must implement `Default + PartialEq + Clone` (its default is its
/// zero value) and [`EnvValue`](crate::EnvValue).
#[macro_export]
macro_rules! leaf {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Merge for $ty {
                fn merge_from(&mut self, other: &Self) {
                    if $crate::merge::is_zero(self) {
                        ::std::clone::Clone::clone_from(self, other);
                    }
                }
            }

            impl $crate::Validate for $ty {
                fn collect_empty(
                    &self,
                    path: &str,
                    required: bool,
                    out: &mut ::std::vec::Vec<::std::string::String>,
                ) {
                    $crate::validate::check_leaf(self, path, required, out);
                }
            }

            impl $crate::FromEnv for $ty {
                fn read_env(
                    &mut self,
                    env: &dyn $crate::EnvSource,
                    prefix: &str,
                    name: ::std::option::Option<&str>,
                ) -> $crate::Result<()> {
                    $crate::env::read_leaf(self, env, prefix, name)
                }
            }
        )+
    };
}

leaf!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    PathBuf,
);
