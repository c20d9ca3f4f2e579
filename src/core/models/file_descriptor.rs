use std::path::{Path, PathBuf};

/// One entry produced by a directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Lowercased extension including the dot (e.g. `.txt`), empty if none.
    pub extension: String,
    pub is_directory: bool,
}

impl FileDescriptor {
    /// Build a descriptor from a path and the stat results for it.
    pub fn new(path: &Path, size: u64, is_directory: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            name,
            size,
            extension,
            is_directory,
        }
    }
}
