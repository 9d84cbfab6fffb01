//! Filesystem helpers with path-carrying errors.

use dragnet_types::{DragnetError, Result};
use std::path::Path;

/// Create a directory and all missing parents.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|e| DragnetError::file(path, e))
}

/// Copy `src` to `dest` byte-for-byte, creating `dest`'s parent directories.
pub fn copy_file(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();
    if let Some(parent) = dest.parent() {
        ensure_dir(parent)?;
    }
    std::fs::copy(src, dest).map_err(|e| DragnetError::file(src, e))?;
    Ok(())
}

/// Read an entire file as a UTF-8 string.
pub fn slurp(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| DragnetError::file(path, e))
}

/// Write a string to a file, creating parent directories.
pub fn spit(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(path, content).map_err(|e| DragnetError::file(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_creates_parents() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        std::fs::write(&src, "payload").unwrap();

        let dest = dir.path().join("a/b/dest.txt");
        copy_file(&src, &dest).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "payload");
    }

    #[test]
    fn test_slurp_missing_file_carries_path() {
        let err = slurp("/nonexistent/dragnet-test").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dragnet-test"));
    }
}
