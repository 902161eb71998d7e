//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A config file inside its own temporary directory.
pub struct TempConfig {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn write_temp_config(contents: &str) -> TempConfig {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("rsinit.toml");
    fs::write(&path, contents).expect("write temp config");
    TempConfig { _dir: dir, path }
}

/// Minimal valid document: everything else falls back to defaults.
pub const MINIMAL_TOML: &str = "[principal]\npassword = \"s3cret\"\n";
