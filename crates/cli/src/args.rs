//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Map global options onto `LoaderOptions`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand};
use envgate::LoaderOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envgate")]
#[command(
    about = "Validate .env files against a template and publish them to the environment",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = concat!(
        "Examples:\n",
        "  envgate check\n",
        "  envgate --dir ./service -o json check\n",
        "  envgate run -- ./server --port 8080\n",
        "  envgate run --production -- ./server\n",
        "  envgate run --mode-key APP_ENV --production-value production -- ./server\n",
        "  envgate cache status\n",
    )
)]
pub struct Cli {
    /// Directory containing the example, env and cache files
    #[arg(short, long, global = true, env = "ENVGATE_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Template file name declaring keys and validator chains (default: .env.example)
    #[arg(long, global = true, env = "ENVGATE_EXAMPLE", value_name = "FILE")]
    pub example: Option<String>,

    /// Env file name providing values (default: .env)
    #[arg(long, global = true, env = "ENVGATE_ENVFILE", value_name = "FILE")]
    pub envfile: Option<String>,

    /// Keep existing non-empty environment values instead of overwriting them
    #[arg(long, global = true, env = "ENVGATE_NO_OVERWRITE")]
    pub no_overwrite: bool,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Print resolved values instead of masking them
    #[arg(long, global = true)]
    pub reveal: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Loader options described by the global flags.
    pub fn loader_options(&self) -> LoaderOptions {
        let mut options = LoaderOptions::new().with_allow_overwrite(!self.no_overwrite);
        if let Some(example) = &self.example {
            options = options.with_example(example.clone());
        }
        if let Some(envfile) = &self.envfile {
            options = options.with_envfile(envfile.clone());
        }
        options
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the env files and print a report without changing anything
    Check,

    /// Validate (or load the cache), then run a command with the resulting environment
    Run {
        /// Production mode: load the cache if present, otherwise validate and write it
        #[arg(long, conflicts_with = "mode_key")]
        production: bool,

        /// Pick production mode when this environment variable equals --production-value
        #[arg(long, value_name = "KEY")]
        mode_key: Option<String>,

        /// Value of --mode-key that selects production mode
        #[arg(long, value_name = "VALUE", default_value = "production")]
        production_value: String,

        /// Command to run, after `--`
        #[arg(last = true, required = true, value_name = "COMMAND")]
        command: Vec<String>,
    },

    /// Inspect or remove the cache file
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Show whether a cache file exists and how many keys it holds
    Status,

    /// Remove the cache file
    Clear,
}
