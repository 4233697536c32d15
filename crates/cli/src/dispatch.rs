//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Turn global flags into loader options.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Mapping errors to exit codes (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::commands::run::RunMode;
use crate::error::ExitCode;

/// Dispatch CLI commands to their respective handlers.
///
/// Returns the process exit code on success; `run` passes its child's code through.
pub(crate) fn run_command(cli: Cli) -> Result<i32> {
    let options = cli.loader_options();

    match cli.command {
        Commands::Check => {
            commands::check::run(&cli.dir, options, &cli.output, cli.reveal)?;
        }
        Commands::Run {
            production,
            mode_key,
            production_value,
            command,
        } => {
            let mode = RunMode::from_flags(production, mode_key, production_value);
            return commands::run::run(&cli.dir, options, mode, &command);
        }
        Commands::Cache { command } => {
            commands::cache::run(command, &cli.dir, &cli.output)?;
        }
    }

    Ok(ExitCode::Success.as_i32())
}
