//! Check command: dry-run validation report.
//!
//! Responsibilities:
//! - Validate the env files against a snapshot of the process environment.
//! - Print the per-key report in the requested format.
//!
//! Does NOT handle:
//! - Committing values or touching the cache (see `run` and `cache`).

use anyhow::{Context, Result};
use envgate::{EnvLoader, LoaderOptions, MemoryEnv};
use std::path::Path;

use crate::error::CheckFailed;
use crate::formatters::{OutputFormat, format_report};

pub fn run(dir: &Path, options: LoaderOptions, output: &str, reveal: bool) -> Result<()> {
    let format = OutputFormat::from_str(output)?;

    let loader = EnvLoader::with_store(dir, options, MemoryEnv::from_process())
        .context("Failed to create loader")?;
    let result = loader.validate();

    println!("{}", format_report(&result, format, reveal)?);

    let failed = result.failures().count();
    if failed > 0 {
        return Err(CheckFailed { failed }.into());
    }

    tracing::info!(keys = result.len(), "All keys valid");
    Ok(())
}
