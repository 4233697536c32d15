//! envgate - validate `.env` files against a template and publish them.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging.
//! - Dispatch to the `check`, `run` and `cache` commands.
//!
//! Does NOT handle:
//! - Validation, commit or cache logic (see `crates/envgate`).
//!
//! Invariants:
//! - Logs go to STDERR so that `run` leaves STDOUT to the child process.
//! - Validation failures exit with code 5; other errors with code 1.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::ExitCodeExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code().as_i32()
        }
    };

    std::process::exit(exit_code);
}
