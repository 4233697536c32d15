//! `EnvLoader`: validate and publish one directory's env files.
//!
//! Responsibilities:
//! - Read the example and real files of a directory (missing files read as empty).
//! - Run the validation engine and commit the result all-or-nothing.
//! - Expose the cache operations and the production/development runners.
//!
//! Does NOT handle:
//! - Parsing or validation logic (see `parser`, `validators`, `engine`).
//! - Process spawning or output formatting (see the CLI crate).
//!
//! Invariants / Assumptions:
//! - Key rules are rebuilt from the example file on every `execute()`.
//! - The cache is only written after a fully successful run, and only when every
//!   value reads back unchanged.
//! - Cached values are trusted and committed without validation.

use std::path::{Path, PathBuf};

use crate::cache::CacheManager;
use crate::commit::commit;
use crate::engine::{KeyRule, RunResult, ValidationEngine};
use crate::error::{AggregateValidationError, CacheError, ConfigurationError, LoaderError};
use crate::fs::read_or_empty;
use crate::parser::parse_lines;
use crate::store::{EnvironmentStore, ProcessEnv};
use crate::validators::ValidatorRegistry;

use super::mode::Mode;
use super::options::LoaderOptions;

/// How a runner obtained the committed environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Loaded from the cache file without validation.
    Cached,
    /// Validated and committed.
    Validated(RunResult),
}

/// Loads, validates and publishes the env files of one directory.
pub struct EnvLoader<S: EnvironmentStore = ProcessEnv> {
    directory: PathBuf,
    example: String,
    envfile: String,
    allow_overwrite: bool,
    registry: ValidatorRegistry,
    cache: CacheManager,
    store: S,
}

impl EnvLoader<ProcessEnv> {
    /// Loader that commits to the real process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingDirectory` if `directory` is empty.
    pub fn new(
        directory: impl Into<PathBuf>,
        options: LoaderOptions,
    ) -> Result<Self, ConfigurationError> {
        Self::with_store(directory, options, ProcessEnv)
    }

    /// Validate against the process environment, using the cache when present.
    pub fn run_production(
        directory: impl Into<PathBuf>,
        options: LoaderOptions,
    ) -> Result<Resolution, LoaderError> {
        Self::run_production_with_store(directory, options, ProcessEnv)
    }

    /// Clear the cache and validate against the process environment.
    pub fn run_development(
        directory: impl Into<PathBuf>,
        options: LoaderOptions,
    ) -> Result<Resolution, LoaderError> {
        Self::run_development_with_store(directory, options, ProcessEnv)
    }

    /// Run in production mode when `mode_key` equals `production_value`, development otherwise.
    pub fn run_auto(
        directory: impl Into<PathBuf>,
        options: LoaderOptions,
        mode_key: &str,
        production_value: &str,
    ) -> Result<Resolution, LoaderError> {
        Self::run_auto_with_store(directory, options, ProcessEnv, mode_key, production_value)
    }
}

impl<S: EnvironmentStore> EnvLoader<S> {
    /// Loader that reads from and commits to `store`.
    pub fn with_store(
        directory: impl Into<PathBuf>,
        options: LoaderOptions,
        store: S,
    ) -> Result<Self, ConfigurationError> {
        let directory = directory.into();
        if directory.as_os_str().is_empty() {
            return Err(ConfigurationError::MissingDirectory);
        }

        let registry = ValidatorRegistry::with_custom(
            options
                .custom_validators()
                .iter()
                .map(|(name, f)| (name.clone(), f.clone())),
        );

        Ok(Self {
            cache: CacheManager::new(&directory),
            example: options.example().to_string(),
            envfile: options.envfile().to_string(),
            allow_overwrite: options.allow_overwrite(),
            registry,
            directory,
            store,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn example_path(&self) -> PathBuf {
        self.directory.join(&self.example)
    }

    pub fn envfile_path(&self) -> PathBuf {
        self.directory.join(&self.envfile)
    }

    pub fn cache_path(&self) -> &Path {
        self.cache.path()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate every declared key without committing anything.
    pub fn validate(&self) -> RunResult {
        let example = parse_lines(&read_or_empty(&self.example_path()));
        let real = parse_lines(&read_or_empty(&self.envfile_path()));

        let rules = KeyRule::from_example(&example, &self.registry);
        tracing::debug!(
            directory = %self.directory.display(),
            keys = rules.len(),
            "Validating environment"
        );
        ValidationEngine::new(&self.registry).run(&rules, &self.store, &real)
    }

    /// Validate and, if every key passed, commit all values.
    ///
    /// # Errors
    ///
    /// Returns every per-key failure when at least one key failed; nothing is committed.
    pub fn execute(&mut self) -> Result<RunResult, AggregateValidationError> {
        let result = self.validate();
        commit(result, &mut self.store, self.allow_overwrite)
    }

    /// Commit the cache file, if any, without validation. Returns false when there is no cache.
    pub fn execute_from_cache(&mut self) -> bool {
        self.cache.load(&mut self.store, self.allow_overwrite)
    }

    pub fn has_cache_file(&self) -> bool {
        self.cache.exists()
    }

    /// Replace the cache file with the successful values of `result`.
    pub fn write_cache(&self, result: &RunResult) -> Result<(), CacheError> {
        self.cache.write(result)
    }

    /// Remove the cache file if present.
    pub fn clear_cache(&self) -> Result<(), CacheError> {
        self.cache.clear()
    }

    /// Run according to `mode`.
    pub fn run(&mut self, mode: Mode) -> Result<Resolution, LoaderError> {
        tracing::debug!(%mode, directory = %self.directory.display(), "Running loader");
        match mode {
            Mode::Production => {
                if self.execute_from_cache() {
                    return Ok(Resolution::Cached);
                }
                let result = self.execute()?;
                match self.write_cache(&result) {
                    Ok(()) => {}
                    // Already committed; the next run validates again.
                    Err(CacheError::UnstorableValue { key, .. }) => {
                        tracing::warn!(%key, "Value cannot be cached, cache not written");
                    }
                    Err(e) => return Err(e.into()),
                }
                Ok(Resolution::Validated(result))
            }
            Mode::Development => {
                self.clear_cache()?;
                Ok(Resolution::Validated(self.execute()?))
            }
        }
    }

    /// `run_production` against an injected store.
    pub fn run_production_with_store(
        directory: impl Into<PathBuf>,
        options: LoaderOptions,
        store: S,
    ) -> Result<Resolution, LoaderError> {
        Self::with_store(directory, options, store)?.run(Mode::Production)
    }

    /// `run_development` against an injected store.
    pub fn run_development_with_store(
        directory: impl Into<PathBuf>,
        options: LoaderOptions,
        store: S,
    ) -> Result<Resolution, LoaderError> {
        Self::with_store(directory, options, store)?.run(Mode::Development)
    }

    /// `run_auto` against an injected store.
    pub fn run_auto_with_store(
        directory: impl Into<PathBuf>,
        options: LoaderOptions,
        store: S,
        mode_key: &str,
        production_value: &str,
    ) -> Result<Resolution, LoaderError> {
        let mode = Mode::detect(&store, mode_key, production_value);
        Self::with_store(directory, options, store)?.run(mode)
    }
}
