//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map envgate errors to the appropriate exit code.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Exit codes of commands spawned by `run` (passed through unchanged).

use envgate::{AggregateValidationError, LoaderError};
use thiserror::Error;

/// Structured exit codes for envgate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - I/O failures, bad arguments, unspawnable commands.
    GeneralError = 1,

    /// Validation error - at least one key failed its validator chain.
    ///
    /// Scripts should fix the env files rather than retry.
    ValidationError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Returned by `check` when the report contains failures.
#[derive(Debug, Error)]
#[error("{failed} key(s) failed validation")]
pub struct CheckFailed {
    pub failed: usize,
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError unless a validation failure is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if cause.is::<CheckFailed>() || cause.is::<AggregateValidationError>() {
                return ExitCode::ValidationError;
            }
            if let Some(LoaderError::Validation(_)) = cause.downcast_ref::<LoaderError>() {
                return ExitCode::ValidationError;
            }
        }
        ExitCode::GeneralError
    }
}
