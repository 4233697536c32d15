//! Error types for the validation pipeline.
//!
//! Responsibilities:
//! - Define the per-call `ValidationError` raised by validators.
//! - Define the aggregated error returned when a run has failures.
//! - Define construction and cache errors, and the `LoaderError` union used by runners.
//!
//! Does NOT handle:
//! - Missing or unreadable input files (those degrade to empty mappings, see `fs.rs`).
//!
//! Invariants:
//! - A `ValidationError` never crosses the key boundary; the engine turns it into a
//!   `Failed` outcome.
//! - `AggregateValidationError` renders one line per failed key, in declaration order.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::AGGREGATE_LINE_PREFIX;
use crate::engine::RunResult;

/// Failure of a single validator call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{validator}]: {message}")]
pub struct ValidationError {
    /// Name the validator was invoked under.
    pub validator: String,
    /// Key being validated.
    pub key: String,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    pub fn new(
        validator: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            validator: validator.into(),
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while constructing a loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("argument \"directory\" is required")]
    MissingDirectory,
}

/// All per-key failures of one run.
///
/// The full run result is kept so callers can still inspect the keys that
/// passed, even though nothing was committed.
#[derive(Error, Debug, Clone)]
pub struct AggregateValidationError {
    result: RunResult,
}

impl AggregateValidationError {
    pub(crate) fn new(result: RunResult) -> Self {
        Self { result }
    }

    /// The discarded (uncommitted) run result.
    pub fn result(&self) -> &RunResult {
        &self.result
    }

    /// Failure messages in declaration order.
    pub fn messages(&self) -> Vec<&str> {
        self.result.failures().map(|(_, message)| message).collect()
    }

    /// Number of keys that failed.
    pub fn len(&self) -> usize {
        self.result.failures().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for AggregateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in self.result.failures() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{AGGREGATE_LINE_PREFIX}{message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Errors from cache file maintenance.
///
/// Reading the cache never fails; an unreadable file loads as empty.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to open cache file at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock cache file at {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write cache file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove cache file at {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The value holds a line break or surrounding whitespace, which the line format cannot keep.
    #[error("Refusing to cache {key} at {path}: value would not read back unchanged")]
    UnstorableValue { path: PathBuf, key: String },
}

/// Errors surfaced by the top-level runners.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Environment validation failed:\n{0}")]
    Validation(#[from] AggregateValidationError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}
