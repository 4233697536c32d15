//! Tests for `EnvLoader`.
//!
//! Responsibilities:
//! - Test `execute()` against in-memory stores and temporary directories.
//! - Test cache operations and the production/development runners.
//! - Test commits to the real process environment.
//!
//! Invariants:
//! - Tests touching the process environment use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

pub mod run_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Write `.env.example` and `.env` into `dir`.
pub fn write_env_files(dir: &Path, example: &str, real: &str) {
    fs::write(dir.join(".env.example"), example).unwrap();
    fs::write(dir.join(".env"), real).unwrap();
}
