//! Centralized constants for the envgate workspace.
//!
//! This module contains file names, separators and literals shared by the
//! library and the CLI to avoid duplicating magic strings.

// =============================================================================
// File Names
// =============================================================================

/// Default name of the template file declaring keys and validator chains.
pub const DEFAULT_EXAMPLE_FILE: &str = ".env.example";

/// Default name of the file providing real values.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Name of the cache file written next to the example and real files.
pub const CACHE_FILE_NAME: &str = ".env.cache";

// =============================================================================
// Syntax
// =============================================================================

/// Separator between a key and its value (or validator chain).
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Separator between the links of a validator chain.
pub const CHAIN_SEPARATOR: char = '|';

/// Separator between validator arguments.
pub const ARG_SEPARATOR: char = ',';

/// Prefix of every line in an aggregated validation error.
pub const AGGREGATE_LINE_PREFIX: &str = "Error: ";

// =============================================================================
// Boolean Literals
// =============================================================================

/// Literals accepted as `true` by the `boolean` validator (case-insensitive).
pub const TRUE_LITERALS: &[&str] = &["true", "1", "yes", "on"];

/// Literals accepted as `false` by the `boolean` validator (case-insensitive).
pub const FALSE_LITERALS: &[&str] = &["false", "0", "no", "off"];
