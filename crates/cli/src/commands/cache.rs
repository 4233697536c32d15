//! Cache command: inspect or remove the cache file.

use anyhow::{Context, Result};
use envgate::CacheManager;
use serde::Serialize;
use std::path::Path;

use crate::args::CacheCommand;
use crate::formatters::OutputFormat;

#[derive(Debug, Serialize)]
struct CacheStatus {
    path: String,
    present: bool,
    keys: usize,
}

pub fn run(command: CacheCommand, dir: &Path, output: &str) -> Result<()> {
    let format = OutputFormat::from_str(output)?;
    let cache = CacheManager::new(dir);

    match command {
        CacheCommand::Status => {
            let entries = cache.read();
            let status = CacheStatus {
                path: cache.path().display().to_string(),
                present: entries.is_some(),
                keys: entries.map(|e| e.len()).unwrap_or(0),
            };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
                OutputFormat::Table if status.present => {
                    println!("Cache present at {} ({} keys)", status.path, status.keys)
                }
                OutputFormat::Table => println!("No cache at {}", status.path),
            }
        }
        CacheCommand::Clear => {
            cache
                .clear()
                .with_context(|| format!("Failed to clear cache in {}", dir.display()))?;
            println!("Cache cleared");
        }
    }

    Ok(())
}
