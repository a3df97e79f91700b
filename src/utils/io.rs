//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

/// Create a directory and any missing parents. Safe to call on an existing directory.
pub fn ensure_dir(path: &Path, operation: &str) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        Error::internal_io(
            format!("{}: {}", path.display(), e),
            Some(operation.to_string()),
        )
    })
}

/// Create a named temp file next to `target`, so a later persist is a same-filesystem rename.
pub fn temp_file_beside(target: &Path, operation: &str) -> Result<NamedTempFile> {
    let parent = target.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", target.display()),
            Some(operation.to_string()),
        )
    })?;

    tempfile::Builder::new()
        .prefix(".wags_tails_")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (create temp)", operation))))
}

/// Atomically move a finished temp file onto its final path.
///
/// Readers of `target` see either the previous file or the complete new one.
pub fn persist(temp: NamedTempFile, target: &Path, operation: &str) -> Result<()> {
    temp.persist(target)
        .map(|_| ())
        .map_err(|e| Error::internal_io(e.error.to_string(), Some(format!("{} (rename)", operation))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_dir(&nested, "test mkdir").unwrap();
        ensure_dir(&nested, "test mkdir").unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn ensure_dir_fails_when_path_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        fs::write(&file, "x").unwrap();

        let err = ensure_dir(&file, "test mkdir").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn persist_replaces_existing_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.txt");
        fs::write(&target, "old").unwrap();

        let mut temp = temp_file_beside(&target, "test write").unwrap();
        write!(temp, "new").unwrap();
        persist(temp, &target, "test write").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }
}
