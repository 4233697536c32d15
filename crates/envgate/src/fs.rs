//! Lenient file reading.
//!
//! A missing or unreadable file is not an error for this crate: it reads as an empty
//! string so that `required`/`fallback` validators report the absence instead.

use std::io::ErrorKind;
use std::path::Path;

/// Read `path` to a string, degrading to an empty string on any failure.
pub(crate) fn read_or_empty(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "File not found, treating as empty");
            String::new()
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to read file, treating as empty"
            );
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(read_or_empty(&temp_dir.path().join("absent")), "");
    }

    #[test]
    fn test_directory_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(read_or_empty(temp_dir.path()), "");
    }

    #[test]
    fn test_existing_file_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "A=1\n").unwrap();
        assert_eq!(read_or_empty(&path), "A=1\n");
    }
}
