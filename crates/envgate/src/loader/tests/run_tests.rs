//! Tests for the production/development runners against an in-memory store.

use tempfile::TempDir;

use super::write_env_files;
use crate::cache::CacheManager;
use crate::error::LoaderError;
use crate::loader::{EnvLoader, LoaderOptions, Resolution};
use crate::store::{EnvironmentStore, MemoryEnv};

#[test]
fn test_production_validates_then_writes_cache() {
    let temp_dir = TempDir::new().unwrap();
    write_env_files(temp_dir.path(), "A=required\nB=fallback(2)", "A=1");
    let mut env = MemoryEnv::new();

    let resolution =
        EnvLoader::run_production_with_store(temp_dir.path(), LoaderOptions::default(), &mut env)
            .unwrap();

    assert!(matches!(resolution, Resolution::Validated(_)));
    assert_eq!(env.get("B").as_deref(), Some("2"));
    let cached = CacheManager::new(temp_dir.path()).read().unwrap();
    assert_eq!(cached["A"], "1");
    assert_eq!(cached["B"], "2");
}

#[test]
fn test_production_prefers_existing_cache() {
    let temp_dir = TempDir::new().unwrap();
    write_env_files(temp_dir.path(), "A=required", "A=from-file");
    std::fs::write(temp_dir.path().join(".env.cache"), "A=from-cache\n").unwrap();
    let mut env = MemoryEnv::new();

    let resolution =
        EnvLoader::run_production_with_store(temp_dir.path(), LoaderOptions::default(), &mut env)
            .unwrap();

    assert_eq!(resolution, Resolution::Cached);
    assert_eq!(env.get("A").as_deref(), Some("from-cache"));
}

#[test]
fn test_production_never_caches_values_that_would_change_on_reload() {
    let temp_dir = TempDir::new().unwrap();
    write_env_files(temp_dir.path(), "A=required", "");
    let mut env: MemoryEnv = [("A", "x\nPATH=/evil")].into_iter().collect();

    let first =
        EnvLoader::run_production_with_store(temp_dir.path(), LoaderOptions::default(), &mut env)
            .unwrap();
    assert!(matches!(first, Resolution::Validated(_)));
    assert!(!temp_dir.path().join(".env.cache").exists());

    let mut next = MemoryEnv::new();
    let second =
        EnvLoader::run_production_with_store(temp_dir.path(), LoaderOptions::default(), &mut next);
    assert!(matches!(second, Err(LoaderError::Validation(_))));
    assert!(next.get("PATH").is_none());
}

#[test]
fn test_production_keeps_padded_value_uncached() {
    let temp_dir = TempDir::new().unwrap();
    write_env_files(temp_dir.path(), "NAME=required", "");
    let mut env: MemoryEnv = [("NAME", "  padded  ")].into_iter().collect();

    EnvLoader::run_production_with_store(temp_dir.path(), LoaderOptions::default(), &mut env)
        .unwrap();

    assert_eq!(env.get("NAME").as_deref(), Some("  padded  "));
    assert!(CacheManager::new(temp_dir.path()).read().is_none());
}

#[test]
fn test_production_failure_writes_no_cache() {
    let temp_dir = TempDir::new().unwrap();
    write_env_files(temp_dir.path(), "A=required", "");
    let mut env = MemoryEnv::new();

    let err =
        EnvLoader::run_production_with_store(temp_dir.path(), LoaderOptions::default(), &mut env)
            .unwrap_err();

    match err {
        LoaderError::Validation(aggregate) => assert_eq!(aggregate.len(), 1),
        other => panic!("expected validation error, got {other}"),
    }
    assert!(!temp_dir.path().join(".env.cache").exists());
    assert!(env.is_empty());
}

#[test]
fn test_development_clears_cache_and_never_writes_it() {
    let temp_dir = TempDir::new().unwrap();
    write_env_files(temp_dir.path(), "A=required", "A=from-file");
    std::fs::write(temp_dir.path().join(".env.cache"), "A=stale\n").unwrap();
    let mut env = MemoryEnv::new();

    let resolution =
        EnvLoader::run_development_with_store(temp_dir.path(), LoaderOptions::default(), &mut env)
            .unwrap();

    assert!(matches!(resolution, Resolution::Validated(_)));
    assert_eq!(env.get("A").as_deref(), Some("from-file"));
    assert!(!temp_dir.path().join(".env.cache").exists());
}

#[test]
fn test_development_error_message_lists_failures() {
    let temp_dir = TempDir::new().unwrap();
    write_env_files(temp_dir.path(), "A=required\nB=number", "B=abc");
    let mut env = MemoryEnv::new();

    let err =
        EnvLoader::run_development_with_store(temp_dir.path(), LoaderOptions::default(), &mut env)
            .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("Environment validation failed:\n"));
    assert!(message.contains("Error: [required]: value for A cannot be empty"));
    assert!(message.contains("Error: [number]: invalid value for B. Should be numeric: abc"));
}

#[test]
fn test_auto_picks_mode_from_store() {
    let temp_dir = TempDir::new().unwrap();
    write_env_files(temp_dir.path(), "A=required", "A=1");

    let mut dev_env: MemoryEnv = [("APP_ENV", "local")].into_iter().collect();
    EnvLoader::run_auto_with_store(
        temp_dir.path(),
        LoaderOptions::default(),
        &mut dev_env,
        "APP_ENV",
        "production",
    )
    .unwrap();
    assert!(!temp_dir.path().join(".env.cache").exists());

    let mut prod_env: MemoryEnv = [("APP_ENV", "production")].into_iter().collect();
    EnvLoader::run_auto_with_store(
        temp_dir.path(),
        LoaderOptions::default(),
        &mut prod_env,
        "APP_ENV",
        "production",
    )
    .unwrap();
    assert!(temp_dir.path().join(".env.cache").exists());
}

#[test]
fn test_runner_rejects_empty_directory() {
    let err = EnvLoader::run_development_with_store("", LoaderOptions::default(), MemoryEnv::new())
        .unwrap_err();
    assert!(matches!(err, LoaderError::Configuration(_)));
}
