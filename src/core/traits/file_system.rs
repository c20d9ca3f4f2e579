use std::path::Path;

use crate::core::errors::Result;

/// Port for whole-file filesystem access used by the orchestrators.
///
/// Files are read and written as complete in-memory buffers.
pub trait FileSystemAccess: Send + Sync {
    /// Read the entire file.
    fn read_whole(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write the entire file, creating parent directories as needed.
    fn write_whole(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all its parents.
    fn ensure_dir(&self, path: &Path) -> Result<()>;
}
