//! Run command: publish the validated environment and exec a child process.
//!
//! Responsibilities:
//! - Run the loader against the real process environment in the selected mode.
//! - Spawn the requested command, which inherits the published environment.
//! - Pass the child's exit status through.
//!
//! Does NOT handle:
//! - Validation or cache semantics (see the envgate library).
//!
//! Invariants:
//! - The child is only spawned after a successful load; a validation failure exits 5.
//! - A child killed by a signal exits with 128 + signal number (Unix convention).

use anyhow::{Context, Result};
use envgate::{EnvLoader, LoaderOptions, Resolution};
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::error::ExitCode;

/// How the environment is resolved before spawning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
    Auto { key: String, production_value: String },
}

impl RunMode {
    pub fn from_flags(
        production: bool,
        mode_key: Option<String>,
        production_value: String,
    ) -> Self {
        match (production, mode_key) {
            (true, _) => RunMode::Production,
            (false, Some(key)) => RunMode::Auto {
                key,
                production_value,
            },
            (false, None) => RunMode::Development,
        }
    }
}

/// Returns the process exit code to use.
pub fn run(dir: &Path, options: LoaderOptions, mode: RunMode, command: &[String]) -> Result<i32> {
    let resolution = match &mode {
        RunMode::Development => EnvLoader::run_development(dir, options),
        RunMode::Production => EnvLoader::run_production(dir, options),
        RunMode::Auto {
            key,
            production_value,
        } => EnvLoader::run_auto(dir, options, key, production_value),
    }?;

    match &resolution {
        Resolution::Cached => tracing::info!("Environment loaded from cache"),
        Resolution::Validated(result) => {
            tracing::info!(keys = result.len(), "Environment validated")
        }
    }

    let Some((program, args)) = command.split_first() else {
        anyhow::bail!("No command given");
    };
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run {program}"))?;

    Ok(exit_code_of(status))
}

fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    ExitCode::GeneralError.as_i32()
}
