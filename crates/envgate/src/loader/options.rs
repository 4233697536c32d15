//! Loader construction options.
//!
//! Invariants:
//! - Empty file names fall back to the defaults (`.env.example`, `.env`).
//! - Custom validators are fixed once the loader is built.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::constants::{DEFAULT_ENV_FILE, DEFAULT_EXAMPLE_FILE};
use crate::error::ValidationError;
use crate::validators::ValidatorFn;

/// Options recognized by `EnvLoader`.
#[derive(Clone)]
pub struct LoaderOptions {
    example: String,
    envfile: String,
    allow_overwrite: bool,
    custom_validators: HashMap<String, ValidatorFn>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderOptions {
    pub fn new() -> Self {
        Self {
            example: DEFAULT_EXAMPLE_FILE.to_string(),
            envfile: DEFAULT_ENV_FILE.to_string(),
            allow_overwrite: true,
            custom_validators: HashMap::new(),
        }
    }

    /// Set the example (template) file name, relative to the loader directory.
    pub fn with_example(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.example = name;
        }
        self
    }

    /// Set the real env file name, relative to the loader directory.
    pub fn with_envfile(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.envfile = name;
        }
        self
    }

    /// Whether committed values may replace existing non-empty environment values.
    pub fn with_allow_overwrite(mut self, allow: bool) -> Self {
        self.allow_overwrite = allow;
        self
    }

    /// Register a custom validator under `name`.
    pub fn with_validator<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &str, &[String]) -> Result<String, ValidationError> + Send + Sync + 'static,
    {
        self.with_validator_fn(name, Arc::new(f))
    }

    /// Register an already shared custom validator under `name`.
    pub fn with_validator_fn(mut self, name: impl Into<String>, f: ValidatorFn) -> Self {
        self.custom_validators.insert(name.into(), f);
        self
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    pub fn envfile(&self) -> &str {
        &self.envfile
    }

    pub fn allow_overwrite(&self) -> bool {
        self.allow_overwrite
    }

    pub fn custom_validators(&self) -> &HashMap<String, ValidatorFn> {
        &self.custom_validators
    }
}

impl fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.custom_validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("LoaderOptions")
            .field("example", &self.example)
            .field("envfile", &self.envfile)
            .field("allow_overwrite", &self.allow_overwrite)
            .field("custom_validators", &names)
            .finish()
    }
}
