use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::file_descriptor::FileDescriptor;

/// Port for enumerating the regular files below a directory.
pub trait DirectoryListing: Send + Sync {
    /// List files in `path`, descending into subdirectories when `recursive`.
    fn scan(&self, path: &Path, recursive: bool) -> Result<Vec<FileDescriptor>>;
}
