//! Validated environment loading for envgate.
//!
//! This crate reads a template file (`.env.example`) declaring keys and validator
//! chains, resolves each key from the environment or a real file (`.env`), runs the
//! chain, and publishes the results into an environment store all-or-nothing. A
//! successful result can be cached (`.env.cache`) so later startups skip validation.

mod cache;
mod commit;
pub mod constants;
mod engine;
mod error;
mod fs;
mod loader;
mod parser;
mod store;
mod validators;

pub use cache::CacheManager;
pub use commit::commit;
pub use engine::{KeyRule, Outcome, ResolvedValue, RunResult, ValidationEngine};
pub use error::{
    AggregateValidationError, CacheError, ConfigurationError, LoaderError, ValidationError,
};
pub use loader::{EnvLoader, LoaderOptions, Mode, Resolution};
pub use parser::{EnvMap, ValidatorCall, parse_chain, parse_lines, split_call};
pub use store::{EnvironmentStore, MemoryEnv, ProcessEnv};
pub use validators::{BuiltIn, Validator, ValidatorFn, ValidatorRegistry};
