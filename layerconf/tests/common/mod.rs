//! Common test utilities for integration tests.
//!
//! This module provides derived schemas, a temporary configuration tree
//! builder and an environment guard for testing the layerconf library.

use std::fs;
use std::path::{Path, PathBuf};

use layerconf::{FromEnv, Merge, Validate};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

/// Top-level schema used across the integration tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Merge, Validate, FromEnv)]
#[serde(default)]
pub struct CustomConfig {
    #[config(env_prefix = "BASE_")]
    pub base: Base,
    pub foo: Foo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Merge, Validate, FromEnv)]
#[serde(default)]
pub struct Base {
    #[config(required, env = "A")]
    pub a: i64,
    #[config(required, env = "B")]
    pub b: String,
    #[config(env = "C")]
    pub c: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Merge, Validate, FromEnv)]
#[serde(default)]
pub struct Foo {
    #[config(required, env = "BAR")]
    pub bar: String,
}

/// A temporary directory tree holding configuration files.
///
/// # Examples
///
/// ```no_run
/// # use common::ConfigDir;
/// let dir = ConfigDir::new()
///     .with_file(".env.json", r#"{"base": {"a": 1}}"#)
///     .with_file("nested/app.yaml", "foo:\n  bar: x\n");
/// ```
#[allow(dead_code)]
pub struct ConfigDir {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl ConfigDir {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, contents).expect("Failed to write config file");
        self
    }

    /// Creates an empty directory at `relative`.
    pub fn with_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.temp_dir.path().join(relative)).expect("Failed to create dir");
        self
    }

    /// The root of the tree.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A path inside the tree.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Reads a file inside the tree.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.join(relative)).expect("Failed to read config file")
    }
}

/// Sets or removes a process environment variable, restoring it on drop.
///
/// Tests using this must be marked `#[serial(env)]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    saved: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let saved = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self {
            key: key.to_string(),
            saved,
        }
    }

    pub fn remove(key: &str) -> Self {
        let saved = std::env::var(key).ok();
        std::env::remove_var(key);
        Self {
            key: key.to_string(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.saved {
            Some(value) => std::env::set_var(&self.key, value),
            None => std::env::remove_var(&self.key),
        }
    }
}
