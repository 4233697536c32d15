//! Top-level loader for a directory's env files.
//!
//! Responsibilities:
//! - Provide `EnvLoader`, the façade over parsing, validation, commit and cache.
//! - Provide `LoaderOptions` for file names, overwrite policy and custom validators.
//! - Provide the production/development runners and `Mode` detection.
//!
//! Does NOT handle:
//! - Validation semantics (see `engine.rs` and `validators`).
//! - Cache file format and locking (see `cache.rs`).
//!
//! Invariants / Assumptions:
//! - Environment values take precedence over the real file.
//! - A failed run commits nothing and never writes the cache.

mod env_loader;
mod mode;
mod options;

pub use env_loader::{EnvLoader, Resolution};
pub use mode::Mode;
pub use options::LoaderOptions;

#[cfg(test)]
mod tests;
