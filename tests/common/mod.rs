//! Common test utilities for tally integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's real home directory, task list, or config.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
pub use tempfile::TempDir;

/// A test environment with an isolated home directory and task list.
///
/// The `ty()` method returns a `Command` that points `HOME`, the XDG dirs,
/// and `TALLY_FILE` at the temp directory per-invocation, making tests
/// parallel-safe.
pub struct TestEnv {
    pub home: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an isolated home directory.
    pub fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    /// Path of the isolated task list file.
    pub fn list_path(&self) -> PathBuf {
        self.home.path().join("todo.txt")
    }

    /// Get a Command for the ty binary with isolated environment.
    pub fn ty(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ty"));
        cmd.current_dir(self.home.path());
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("XDG_DATA_HOME", self.home.path().join(".local/share"));
        cmd.env("TALLY_FILE", self.list_path());
        cmd.env_remove("TALLY_CONFIG");
        cmd.env_remove("VISUAL");
        cmd.env_remove("EDITOR");
        cmd
    }

    /// Seed the task list with the given contents.
    pub fn write_list(&self, contents: &str) {
        fs::write(self.list_path(), contents).unwrap();
    }

    /// Read the task list back (empty string if it doesn't exist yet).
    pub fn read_list(&self) -> String {
        fs::read_to_string(self.list_path()).unwrap_or_default()
    }

    /// Write a config file where the binary will pick it up.
    pub fn write_config(&self, contents: &str) {
        let dir = self.home.path().join(".config/tally");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), contents).unwrap();
    }

    /// Names of the sibling backup/snapshot files, sorted.
    pub fn sibling_files(&self, marker: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.home.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains(marker))
            .collect();
        names.sort();
        names
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
