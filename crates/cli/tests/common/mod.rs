//! Shared test utilities for envgate CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Provide a fixture directory with example and env files.
//!
//! Invariants / Assumptions:
//! - `ENVGATE_*` variables from the host never leak into tests.
//! - Each fixture lives in its own temporary directory.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a hermetic `envgate` command running inside `dir`.
pub fn envgate_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envgate");
    cmd.current_dir(dir);

    cmd.env_remove("ENVGATE_DIR")
        .env_remove("ENVGATE_EXAMPLE")
        .env_remove("ENVGATE_ENVFILE")
        .env_remove("ENVGATE_NO_OVERWRITE")
        .env_remove("RUST_LOG");

    cmd
}

/// Temporary directory holding `.env.example` and `.env`.
pub fn fixture(example: &str, real: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env.example"), example).unwrap();
    fs::write(temp_dir.path().join(".env"), real).unwrap();
    temp_dir
}
