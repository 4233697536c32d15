//! Parsers for env files and validator chains.
//!
//! Responsibilities:
//! - Turn raw `KEY=VALUE` file text into an ordered mapping (`lines.rs`).
//! - Turn a validator-chain expression into ordered validator calls (`expression.rs`).
//!
//! Does NOT handle:
//! - Quoting, escapes, comments or multiline values.
//! - Running validators (see `engine.rs`).

mod expression;
mod lines;

pub use expression::{ValidatorCall, parse_chain, split_call};
pub use lines::{EnvMap, parse_lines};
