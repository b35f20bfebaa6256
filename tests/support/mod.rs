//! Test support utilities for citadel integration tests.
//!
//! Provides isolated CLI environments, library-level fakes of every
//! collaborator, fixtures and assertion helpers.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fakes;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fakes::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own working directory, home directory and fs store.
/// Child processes use `.current_dir()` and explicit environment variables,
/// so tests can run in parallel.
pub struct Test {
    /// Working directory of the command
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        Self { dir, home }
    }

    /// Root of the fs store used by commands.
    pub fn store_root(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    /// Path of an object in the environment's namespace.
    pub fn object_path(&self, key: &str) -> PathBuf {
        self.store_root().join(ENVIRONMENT).join(key)
    }

    /// Write an object into the store.
    pub fn seed(&self, key: &str, contents: &str) {
        let path = self.object_path(key);
        std::fs::create_dir_all(path.parent().expect("object has a parent"))
            .expect("failed to create store directory");
        std::fs::write(path, contents).expect("failed to seed object");
    }

    /// Read an object from the store, if present.
    pub fn object(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.object_path(key)).ok()
    }
}
