//! All-or-nothing commit of a run.
//!
//! Invariants:
//! - If any key failed, nothing is written and the aggregated error is returned.
//! - A value the store would refuse counts as a failure, checked before any write.
//! - Otherwise every resolved value is written, subject to the overwrite policy.

use crate::engine::{Outcome, RunResult};
use crate::error::{AggregateValidationError, ValidationError};
use crate::parser::EnvMap;
use crate::store::EnvironmentStore;

/// Commit `result` to `store`, or return every failure without writing anything.
pub fn commit<S>(
    result: RunResult,
    store: &mut S,
    allow_overwrite: bool,
) -> Result<RunResult, AggregateValidationError>
where
    S: EnvironmentStore + ?Sized,
{
    let result = reject_unstorable(result, &*store);
    if !result.is_success() {
        let error = AggregateValidationError::new(result);
        tracing::warn!(failed = error.len(), "Validation failed, nothing committed");
        return Err(error);
    }

    let written = result
        .iter()
        .filter(|v| store.set(&v.key, &v.value, allow_overwrite))
        .count();
    tracing::info!(keys = result.len(), written, "Committed environment");

    Ok(result)
}

/// Mark successful values that `store` would refuse to hold as failed.
fn reject_unstorable<S>(result: RunResult, store: &S) -> RunResult
where
    S: EnvironmentStore + ?Sized,
{
    result
        .into_iter()
        .map(|mut v| {
            if v.is_ok() && !store.accepts(&v.key, &v.value) {
                let error = ValidationError::new(
                    "environment",
                    v.key.as_str(),
                    format!("value for {} cannot be stored in the environment", v.key),
                );
                tracing::warn!(key = %v.key, "Value rejected by environment store");
                v.outcome = Outcome::Failed(error.to_string());
            }
            v
        })
        .collect()
}

/// Write trusted entries directly, bypassing validation. Returns the number written.
pub(crate) fn commit_entries<S>(entries: &EnvMap, store: &mut S, allow_overwrite: bool) -> usize
where
    S: EnvironmentStore + ?Sized,
{
    entries
        .iter()
        .filter(|(key, value)| store.set(key, value, allow_overwrite))
        .count()
}
