//! Validator registry.
//!
//! Responsibilities:
//! - Define the `ValidatorFn` capability shared by built-in and custom validators.
//! - Resolve validator names to callable validators in a single lookup.
//!
//! Does NOT handle:
//! - Parsing chain expressions (see `parser/expression.rs`).
//! - Threading values through a chain (see `engine.rs`).
//!
//! Invariants:
//! - Built-in names always resolve to the built-in; a custom validator registered
//!   under a built-in name is ignored.
//! - Registration happens at construction; the registry is read-only during a run.

mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ValidationError;

pub use builtin::BuiltIn;

/// Signature shared by every validator: `(key, value, args) -> new value`.
pub type ValidatorFn =
    Arc<dyn Fn(&str, &str, &[String]) -> Result<String, ValidationError> + Send + Sync>;

/// A resolvable validator.
#[derive(Clone)]
pub enum Validator {
    BuiltIn(BuiltIn),
    Custom(ValidatorFn),
}

impl Validator {
    /// Run the validator. `name` is the name it was invoked under (used in error messages).
    pub fn call(
        &self,
        name: &str,
        key: &str,
        value: &str,
        args: &[String],
    ) -> Result<String, ValidationError> {
        match self {
            Validator::BuiltIn(builtin) => builtin.call(name, key, value, args),
            Validator::Custom(f) => f(key, value, args),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::BuiltIn(builtin) => f.debug_tuple("BuiltIn").field(builtin).finish(),
            Validator::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Name → validator table.
#[derive(Clone)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Validator>,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ValidatorRegistry {
    /// Registry holding only the built-in validators.
    pub fn builtin() -> Self {
        let validators = BuiltIn::NAMES
            .iter()
            .map(|&(name, builtin)| (name.to_string(), Validator::BuiltIn(builtin)))
            .collect();
        Self { validators }
    }

    /// Registry holding the built-ins plus the given custom validators.
    pub fn with_custom<I>(custom: I) -> Self
    where
        I: IntoIterator<Item = (String, ValidatorFn)>,
    {
        let mut registry = Self::builtin();
        for (name, f) in custom {
            registry.register(name, f);
        }
        registry
    }

    /// Register a custom validator. Returns false if a built-in already owns the name.
    pub fn register(&mut self, name: impl Into<String>, f: ValidatorFn) -> bool {
        let name = name.into();
        if let Some(Validator::BuiltIn(_)) = self.validators.get(&name) {
            tracing::warn!(validator = %name, "Custom validator shadowed by built-in, ignoring");
            return false;
        }
        self.validators.insert(name, Validator::Custom(f));
        true
    }

    pub fn resolve(&self, name: &str) -> Option<&Validator> {
        self.validators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ValidatorRegistry")
            .field("validators", &names)
            .finish()
    }
}
