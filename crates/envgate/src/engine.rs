//! Validation engine.
//!
//! Responsibilities:
//! - Build a `KeyRule` for every key declared in the example file.
//! - Resolve each key's current value (environment > real file > empty).
//! - Thread the value through the key's validator chain and record the outcome.
//!
//! Does NOT handle:
//! - Writing anything to the environment (see `commit.rs`).
//! - Reading files (values arrive as parsed `EnvMap`s).
//!
//! Invariants:
//! - Rules are evaluated in declaration order; the result preserves that order.
//! - A failing validator stops its chain; later validators for that key never run.
//! - Keys present only in the real file are ignored.

use serde::Serialize;

use crate::error::ValidationError;
use crate::parser::{EnvMap, ValidatorCall, parse_chain};
use crate::store::EnvironmentStore;
use crate::validators::ValidatorRegistry;

/// A declared key together with its parsed validator chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRule {
    pub key: String,
    pub chain: Vec<ValidatorCall>,
}

impl KeyRule {
    pub fn parse(key: impl Into<String>, expression: &str, registry: &ValidatorRegistry) -> Self {
        Self {
            key: key.into(),
            chain: parse_chain(expression, registry),
        }
    }

    /// One rule per entry of a parsed example file, in file order.
    pub fn from_example(example: &EnvMap, registry: &ValidatorRegistry) -> Vec<Self> {
        example
            .iter()
            .map(|(key, expression)| Self::parse(key.as_str(), expression, registry))
            .collect()
    }
}

/// Outcome of validating one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum Outcome {
    Ok,
    Failed(String),
}

/// Value resolved for one key during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValue {
    pub key: String,
    /// Final chain output on success, the resolved input value on failure.
    pub value: String,
    pub outcome: Outcome,
}

impl ResolvedValue {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok)
    }
}

/// Ordered per-key results of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RunResult {
    values: Vec<ResolvedValue>,
}

impl RunResult {
    pub fn new(values: Vec<ResolvedValue>) -> Self {
        Self { values }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.values.iter().find(|v| v.key == key)
    }

    /// True when no key failed.
    pub fn is_success(&self) -> bool {
        self.values.iter().all(ResolvedValue::is_ok)
    }

    /// `(key, message)` for every failed key, in declaration order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().filter_map(|v| match &v.outcome {
            Outcome::Failed(message) => Some((v.key.as_str(), message.as_str())),
            Outcome::Ok => None,
        })
    }
}

impl<'a> IntoIterator for &'a RunResult {
    type Item = &'a ResolvedValue;
    type IntoIter = std::slice::Iter<'a, ResolvedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for RunResult {
    type Item = ResolvedValue;
    type IntoIter = std::vec::IntoIter<ResolvedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl FromIterator<ResolvedValue> for RunResult {
    fn from_iter<I: IntoIterator<Item = ResolvedValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Runs key rules against an environment store and the real file's values.
pub struct ValidationEngine<'a> {
    registry: &'a ValidatorRegistry,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(registry: &'a ValidatorRegistry) -> Self {
        Self { registry }
    }

    /// Validate every rule. Never touches the store beyond reads.
    pub fn run<S>(&self, rules: &[KeyRule], store: &S, real: &EnvMap) -> RunResult
    where
        S: EnvironmentStore + ?Sized,
    {
        rules
            .iter()
            .map(|rule| {
                let current = resolve_current(&rule.key, store, real);
                match self.run_chain(&rule.key, current.clone(), &rule.chain) {
                    Ok(value) => ResolvedValue {
                        key: rule.key.clone(),
                        value,
                        outcome: Outcome::Ok,
                    },
                    Err(e) => {
                        tracing::warn!(
                            key = %rule.key,
                            validator = %e.validator,
                            "Validation failed"
                        );
                        ResolvedValue {
                            key: rule.key.clone(),
                            value: current,
                            outcome: Outcome::Failed(e.to_string()),
                        }
                    }
                }
            })
            .collect()
    }

    fn run_chain(
        &self,
        key: &str,
        mut value: String,
        chain: &[ValidatorCall],
    ) -> Result<String, ValidationError> {
        for call in chain {
            // Chains are filtered at parse time, but rules may be built by hand.
            let Some(validator) = self.registry.resolve(&call.name) else {
                tracing::debug!(key, validator = %call.name, "Skipping unknown validator");
                continue;
            };
            value = validator.call(&call.name, key, &value, &call.args)?;
        }
        Ok(value)
    }
}

/// Environment value if present and non-empty, else the real file's value, else empty.
fn resolve_current<S>(key: &str, store: &S, real: &EnvMap) -> String
where
    S: EnvironmentStore + ?Sized,
{
    store
        .get(key)
        .filter(|v| !v.is_empty())
        .or_else(|| real.get(key).cloned())
        .unwrap_or_default()
}
