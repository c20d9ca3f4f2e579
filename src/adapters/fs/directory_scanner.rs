use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::errors::{EncryptzError, Result};
use crate::core::models::file_descriptor::FileDescriptor;
use crate::core::traits::directory_listing::DirectoryListing;

/// Recursive directory listing on the local disk.
///
/// Only regular files are returned; entries are sorted by name within each
/// directory so batches run in a stable order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    fn walk(dir: &Path, recursive: bool, files: &mut Vec<FileDescriptor>) -> Result<()> {
        let mut entries = fs::read_dir(dir)
            .map_err(|e| EncryptzError::io_at(dir, e))?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| EncryptzError::io_at(dir, e))?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let meta = fs::metadata(&path).map_err(|e| EncryptzError::io_at(&path, e))?;

            if meta.is_dir() {
                if recursive {
                    Self::walk(&path, recursive, files)?;
                }
            } else if meta.is_file() {
                files.push(FileDescriptor::new(&path, meta.len(), false));
            }
        }

        Ok(())
    }
}

impl DirectoryListing for DirectoryScanner {
    fn scan(&self, path: &Path, recursive: bool) -> Result<Vec<FileDescriptor>> {
        if !path.is_dir() {
            return Err(EncryptzError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        Self::walk(path, recursive, &mut files)?;
        debug!(
            path = %path.display(),
            files = files.len(),
            recursive,
            "scanned directory"
        );
        Ok(files)
    }
}
