//! Production/development mode selection.

use std::fmt;

use crate::store::EnvironmentStore;

/// How a run treats the cache file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Use the cache when present; otherwise validate and write it.
    Production,
    /// Always clear the cache and validate; never write the cache.
    Development,
}

impl Mode {
    /// Production when `key` currently holds exactly `production_value`.
    pub fn detect<S>(store: &S, key: &str, production_value: &str) -> Self
    where
        S: EnvironmentStore + ?Sized,
    {
        if store.get(key).as_deref() == Some(production_value) {
            Mode::Production
        } else {
            Mode::Development
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Production => f.write_str("production"),
            Mode::Development => f.write_str("development"),
        }
    }
}
