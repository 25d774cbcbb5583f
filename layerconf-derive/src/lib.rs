//! Derive macros for layerconf schemas.
//!
//! This crate provides:
//! - `#[derive(Merge)]` for first-source-wins, field-by-field merging
//! - `#[derive(Validate)]` for collecting unset required fields
//! - `#[derive(FromEnv)]` for populating a schema from environment variables
//!
//! All three share the `#[config(...)]` attribute namespace. The generated
//! code refers to the `layerconf` crate by absolute path, so these derives are
//! meant to be used through the re-exports in `layerconf`.

mod attrs;
mod from_env;
mod merge;
mod validate;

use proc_macro::TokenStream;

/// Derive the `Merge` trait.
///
/// Every field is merged with its own `Merge` impl, in declaration order.
/// Leaf types only take the other value while they are still zero-valued;
/// nested structs deriving `Merge` recurse.
///
/// # Usage
///
/// ```ignore
/// use layerconf::Merge;
///
/// #[derive(Default, Merge)]
/// struct Database {
///     url: String,
///     pool_size: u32,
/// }
/// ```
///
/// # Attributes
///
/// - `#[config(skip)]`: leave the field out of merging entirely.
#[proc_macro_derive(Merge, attributes(config))]
pub fn derive_merge(input: TokenStream) -> TokenStream {
    merge::expand(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive the `Validate` trait.
///
/// Reports every `#[config(required)]` leaf that is still zero-valued, using
/// dotted field paths (`base.url`).
///
/// # Attributes
///
/// - `#[config(required)]`: the field must be set once all sources are merged.
/// - `#[config(skip)]`: never report the field.
#[proc_macro_derive(Validate, attributes(config))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    validate::expand(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive the `FromEnv` trait.
///
/// # Usage
///
/// ```ignore
/// use layerconf::FromEnv;
///
/// #[derive(Default, FromEnv)]
/// #[config(env_prefix = "APP_")]
/// struct AppConfig {
///     #[config(env_prefix = "DB_")]
///     database: Database,
///     #[config(env = "LOG_LEVEL")]
///     log_level: String,
/// }
/// ```
///
/// # Attributes
///
/// - `#[config(env = "NAME")]`: read the field from `NAME` (after prefixes).
/// - `#[config(env_prefix = "P_")]`: on the struct, prefix every variable; on
///   a nested struct field, prefix every variable of that sub-structure.
/// - `#[config(skip)]`: never read the field from the environment.
#[proc_macro_derive(FromEnv, attributes(config))]
pub fn derive_from_env(input: TokenStream) -> TokenStream {
    from_env::expand(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
