use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::errors::{EncryptzError, Result};
use crate::core::traits::file_system::FileSystemAccess;

/// `FileSystemAccess` backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystemAccess for LocalFileSystem {
    fn read_whole(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(path).map_err(|e| EncryptzError::io_at(path, e))?;
        debug!(path = %path.display(), bytes = data.len(), "read file");
        Ok(data)
    }

    fn write_whole(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| EncryptzError::io_at(parent, e))?;
        }
        fs::write(path, data).map_err(|e| EncryptzError::io_at(path, e))?;
        debug!(path = %path.display(), bytes = data.len(), "wrote file");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| EncryptzError::io_at(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c.bin");

        LocalFileSystem.write_whole(&target, b"payload").unwrap();
        assert_eq!(LocalFileSystem.read_whole(&target).unwrap(), b"payload");
    }

    #[test]
    fn read_missing_file_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = LocalFileSystem.read_whole(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        LocalFileSystem.ensure_dir(&out).unwrap();
        LocalFileSystem.ensure_dir(&out).unwrap();
        assert!(LocalFileSystem.is_dir(&out));
    }
}
