//! Validator-chain expression parsing.
//!
//! A chain looks like `required|enum(dev,prod)|fallback(dev)`.
//!
//! Invariants:
//! - Links are separated by `|`, trimmed, and blank links are skipped.
//! - The method name ends at the LAST `(`; arguments end at the LAST `)`.
//! - Arguments are split on `,` verbatim (no trimming, no escaping), so an argument
//!   cannot contain `,`, `)` or `|`.
//! - `name()` has zero arguments, not one empty argument.
//! - Names unknown to the registry are dropped from the chain.

use crate::constants::{ARG_SEPARATOR, CHAIN_SEPARATOR};
use crate::validators::ValidatorRegistry;

/// One link in a validator chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorCall {
    pub name: String,
    pub args: Vec<String>,
}

impl ValidatorCall {
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Split a single chain link into its name and arguments.
pub fn split_call(token: &str) -> ValidatorCall {
    let token = token.trim();

    let Some(open) = token.rfind('(') else {
        return ValidatorCall::new(token, Vec::<String>::new());
    };

    let name = token[..open].trim_end();
    let args = match token.rfind(')') {
        Some(close) if close > open => split_args(&token[open + 1..close]),
        _ => Vec::new(),
    };

    ValidatorCall {
        name: name.to_string(),
        args,
    }
}

fn split_args(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(ARG_SEPARATOR).map(str::to_string).collect()
}

/// Parse a chain expression, keeping only calls the registry can resolve.
pub fn parse_chain(expression: &str, registry: &ValidatorRegistry) -> Vec<ValidatorCall> {
    expression
        .split(CHAIN_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(split_call)
        .filter(|call| {
            let known = registry.contains(&call.name);
            if !known {
                tracing::debug!(validator = %call.name, "Dropping unknown validator from chain");
            }
            known
        })
        .collect()
}
