//! Cache of the last successfully committed environment.
//!
//! Responsibilities:
//! - Persist every successful `ResolvedValue` as flat `KEY=VALUE` lines.
//! - Restore a cache file straight into an environment store, skipping validation.
//! - Check for and remove the cache file.
//!
//! Does NOT handle:
//! - Deciding when to use the cache (see `loader`).
//!
//! Invariants:
//! - Writes hold an exclusive advisory lock from truncation through `sync_all`.
//! - A write that fails after truncation removes the file before releasing the lock.
//! - Only values that read back unchanged are written; otherwise nothing is.
//! - Reads take no lock; a concurrent writer may be observed mid-write.
//! - An unreadable cache file loads as empty.

use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::commit::commit_entries;
use crate::constants::{CACHE_FILE_NAME, KEY_VALUE_SEPARATOR};
use crate::engine::RunResult;
use crate::error::CacheError;
use crate::fs::read_or_empty;
use crate::parser::{EnvMap, parse_lines};
use crate::store::EnvironmentStore;

/// Owns the cache file location for one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheManager {
    path: PathBuf,
}

impl CacheManager {
    /// Cache manager for `<directory>/.env.cache`.
    pub fn new(directory: &Path) -> Self {
        Self {
            path: directory.join(CACHE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Remove the cache file. Removing a missing file is not an error.
    pub fn clear(&self) -> Result<(), CacheError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Cache cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Replace the cache with every successful value of `result`.
    ///
    /// # Errors
    ///
    /// `CacheError::UnstorableValue` if a value contains a line break or surrounding
    /// whitespace; the cache file is left untouched.
    pub fn write(&self, result: &RunResult) -> Result<(), CacheError> {
        if let Some(bad) = result.iter().find(|v| v.is_ok() && !survives_reload(&v.value)) {
            return Err(CacheError::UnstorableValue {
                path: self.path.clone(),
                key: bad.key.clone(),
            });
        }
        let contents = render(result);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|source| CacheError::Open {
                path: self.path.clone(),
                source,
            })?;

        let _lock = ExclusiveLock::acquire(&file).map_err(|source| CacheError::Lock {
            path: self.path.clone(),
            source,
        })?;

        if let Err(source) = write_locked(&file, contents.as_bytes()) {
            // A truncated file would otherwise load as a valid, partial cache.
            if let Err(e) = std::fs::remove_file(&self.path) {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove partial cache"
                );
            }
            return Err(CacheError::Write {
                path: self.path.clone(),
                source,
            });
        }

        tracing::info!(
            path = %self.path.display(),
            keys = result.iter().filter(|v| v.is_ok()).count(),
            "Cache written"
        );
        Ok(())
    }

    /// Parsed cache contents, or `None` when there is no cache file.
    pub fn read(&self) -> Option<EnvMap> {
        self.exists().then(|| parse_lines(&read_or_empty(&self.path)))
    }

    /// Commit every cached entry to `store`. Returns false when there is no cache file.
    pub fn load<S>(&self, store: &mut S, allow_overwrite: bool) -> bool
    where
        S: EnvironmentStore + ?Sized,
    {
        let Some(entries) = self.read() else {
            return false;
        };
        let written = commit_entries(&entries, store, allow_overwrite);
        tracing::info!(
            path = %self.path.display(),
            keys = entries.len(),
            written,
            "Environment loaded from cache"
        );
        true
    }
}

fn render(result: &RunResult) -> String {
    result
        .iter()
        .filter(|v| v.is_ok())
        .map(|v| format!("{}{}{}\n", v.key, KEY_VALUE_SEPARATOR, v.value))
        .collect()
}

/// `parse_lines` trims lines and values and splits on line breaks.
fn survives_reload(value: &str) -> bool {
    !value.contains(['\n', '\r']) && value.trim() == value
}

fn write_locked(mut file: &File, contents: &[u8]) -> io::Result<()> {
    file.set_len(0)?;
    file.write_all(contents)?;
    file.flush()?;
    file.sync_all()
}

/// Exclusive advisory lock released on drop.
struct ExclusiveLock<'a> {
    file: &'a File,
}

impl<'a> ExclusiveLock<'a> {
    fn acquire(file: &'a File) -> io::Result<Self> {
        flock(file, true)?;
        Ok(Self { file })
    }
}

impl Drop for ExclusiveLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = flock(self.file, false) {
            tracing::warn!(error = %e, "Failed to release cache lock");
        }
    }
}

/// Blocking `flock(LOCK_EX)` / `flock(LOCK_UN)`, retried on `EINTR`.
#[cfg(unix)]
fn flock(file: &File, exclusive: bool) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let operation = if exclusive {
        libc::LOCK_EX
    } else {
        libc::LOCK_UN
    };
    loop {
        // SAFETY: flock is a standard POSIX call on a valid descriptor owned by `file`.
        let result = unsafe { libc::flock(file.as_raw_fd(), operation) };
        if result == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(not(unix))]
fn flock(file: &File, _exclusive: bool) -> io::Result<()> {
    let _ = file;
    Ok(())
}
