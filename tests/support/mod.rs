//! Test support utilities for hazyctl integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own working dir and home dir, so the config file
/// bootstrapped under `~/.hazy` never touches the real home. Child processes
/// use `.current_dir()` so tests can safely run in parallel.
pub struct Test {
    /// Working directory for the command
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with a pre-written config file.
    pub fn with_config(yaml: &str) -> Self {
        let t = Self::new();
        std::fs::create_dir_all(t.config_path().parent().unwrap()).unwrap();
        std::fs::write(t.config_path(), yaml).unwrap();
        t
    }

    /// `~/.hazy/config.yaml` inside the temp home.
    pub fn config_path(&self) -> PathBuf {
        self.home.path().join(".hazy").join("config.yaml")
    }

    /// Path inside the working directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
