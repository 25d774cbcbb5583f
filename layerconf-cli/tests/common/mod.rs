//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated configuration tree.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// The layerconf environment variables are cleared so the host
    /// environment cannot leak into tests.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("layerconf").expect("Failed to find layerconf binary");
        cmd.env_remove("LAYERCONF_WALK_DEPTH")
            .env_remove("LAYERCONF_ENV_PREFIX")
            .env_remove("LAYERCONF_LOG_MODE");
        cmd
    }

    /// Get a command builder with the base directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--base-dir").arg(&self.temp_path);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write a file relative to the test environment.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Read a file relative to the test environment.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.temp_path.join(name)).expect("Failed to read test file")
    }
}

/// Write the three layered files used by several tests.
#[allow(dead_code)]
pub fn three_layer_env() -> TestEnv {
    let env = TestEnv::new();
    env.write(".env.json", r#"{"base": {"a": 1}}"#);
    env.write(".env.base.yaml", "base:\n  b: \"2\"\n");
    env.write(".env.local.yaml", "foo:\n  bar: \"4\"\n");
    env
}
