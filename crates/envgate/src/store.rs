//! Environment stores that values are resolved from and committed to.
//!
//! Responsibilities:
//! - Define the `EnvironmentStore` capability (get by key, set with overwrite policy).
//! - Provide `ProcessEnv`, backed by the real process environment.
//! - Provide `MemoryEnv`, an in-memory store for dry runs and tests.
//!
//! Does NOT handle:
//! - Deciding what to write (see `commit.rs` and `cache.rs`).
//!
//! Invariants:
//! - An empty value counts as absent, both for resolution and for the overwrite policy.
//! - With overwrite disabled, a present non-empty value is never replaced.

use std::collections::HashMap;

/// Key/value environment the pipeline reads from and commits to.
pub trait EnvironmentStore {
    /// Current value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Unconditionally write `key=value`. Returns false if the store refused the write.
    fn insert(&mut self, key: &str, value: &str) -> bool;

    /// Whether `insert` would store `key=value`. Checked for every key before a commit writes.
    fn accepts(&self, _key: &str, _value: &str) -> bool {
        true
    }

    /// Write `key=value` subject to the overwrite policy.
    ///
    /// Returns true when the value was written.
    fn set(&mut self, key: &str, value: &str, overwrite: bool) -> bool {
        if !overwrite && self.get(key).is_some_and(|existing| !existing.is_empty()) {
            tracing::debug!(key, "Existing value preserved (overwrite disabled)");
            return false;
        }
        self.insert(key, value)
    }
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvironmentStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        if !is_valid_name(key) {
            return None;
        }
        std::env::var(key).ok()
    }

    fn accepts(&self, key: &str, value: &str) -> bool {
        is_valid_name(key) && !value.contains('\0')
    }

    fn insert(&mut self, key: &str, value: &str) -> bool {
        if !self.accepts(key, value) {
            tracing::warn!(key, "Refusing to set environment variable with invalid name or value");
            return false;
        }
        // SAFETY: the pipeline is single-threaded and commits synchronously; callers must not
        // read or write the environment from other threads while a run is committing.
        unsafe {
            std::env::set_var(key, value);
        }
        true
    }
}

/// `set_var` panics on empty names, `=` and NUL.
fn is_valid_name(key: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0'])
}

/// In-memory environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment (non-unicode entries are skipped).
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// All variables currently held.
    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvironmentStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn insert(&mut self, key: &str, value: &str) -> bool {
        self.vars.insert(key.to_string(), value.to_string());
        true
    }
}

impl<S: EnvironmentStore + ?Sized> EnvironmentStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn insert(&mut self, key: &str, value: &str) -> bool {
        (**self).insert(key, value)
    }

    fn accepts(&self, key: &str, value: &str) -> bool {
        (**self).accepts(key, value)
    }
}
