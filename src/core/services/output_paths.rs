use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const ENCRYPTED_SUFFIX: &str = ".encrypted";
pub const DECRYPTED_SUFFIX: &str = ".decrypted";

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

fn strip_suffix(path: &Path, suffix: &str) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(suffix).filter(|s| !s.is_empty())?;
    Some(path.with_file_name(stem))
}

/// `report.pdf` → `report.pdf.encrypted`
pub fn encrypted_file_path(input: &Path) -> PathBuf {
    append_suffix(input, ENCRYPTED_SUFFIX)
}

/// `report.pdf.encrypted` → `report.pdf`; anything else gets `.decrypted` appended.
pub fn decrypted_file_path(input: &Path) -> PathBuf {
    strip_suffix(input, ENCRYPTED_SUFFIX).unwrap_or_else(|| append_suffix(input, DECRYPTED_SUFFIX))
}

/// Whether a file name marks an encrypted file.
pub fn is_encrypted_name(name: &str) -> bool {
    name.ends_with(ENCRYPTED_SUFFIX)
}

/// Sibling output directory: `docs` → `docs_encrypted`.
///
/// Paths without a final name (`.`, `..`) are resolved first, so the output
/// lands beside the directory rather than inside it.
pub fn sibling_directory(dir: &Path, tag: &str) -> PathBuf {
    let resolved;
    let dir = match dir.file_name() {
        Some(_) => dir,
        None => {
            resolved = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
            resolved.as_path()
        }
    };

    match dir.file_name() {
        Some(name) => {
            let mut sibling = name.to_owned();
            sibling.push(format!("_{tag}"));
            dir.with_file_name(sibling)
        }
        None => PathBuf::from(format!("{}_{tag}", dir.display())),
    }
}

/// Mirror `file` (located under `root`) into `out_dir`, mapping its relative
/// path through `rename`.
pub fn mirrored_path(
    root: &Path,
    file: &Path,
    out_dir: &Path,
    rename: impl Fn(&Path) -> PathBuf,
) -> PathBuf {
    let relative = file.strip_prefix(root).unwrap_or(file);
    out_dir.join(rename(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_appends_suffix() {
        assert_eq!(
            encrypted_file_path(Path::new("dir/report.pdf")),
            PathBuf::from("dir/report.pdf.encrypted")
        );
    }

    #[test]
    fn decrypt_strips_suffix() {
        assert_eq!(
            decrypted_file_path(Path::new("dir/report.pdf.encrypted")),
            PathBuf::from("dir/report.pdf")
        );
    }

    #[test]
    fn decrypt_without_suffix_appends_decrypted() {
        assert_eq!(
            decrypted_file_path(Path::new("dir/blob.bin")),
            PathBuf::from("dir/blob.bin.decrypted")
        );
        assert_eq!(
            decrypted_file_path(Path::new(".encrypted")),
            PathBuf::from(".encrypted.decrypted")
        );
    }

    #[test]
    fn sibling_directory_handles_trailing_slash() {
        assert_eq!(
            sibling_directory(Path::new("data/docs/"), "encrypted"),
            PathBuf::from("data/docs_encrypted")
        );
        assert_eq!(
            sibling_directory(Path::new("docs"), "decrypted"),
            PathBuf::from("docs_decrypted")
        );
    }

    #[test]
    fn sibling_of_parent_reference_is_outside_the_tree() {
        let root = tempfile::tempdir().unwrap();
        let docs = root.path().join("docs");
        std::fs::create_dir(&docs).unwrap();
        std::fs::create_dir(docs.join("inner")).unwrap();

        let canonical = docs.canonicalize().unwrap();
        let sibling = sibling_directory(&docs.join("inner").join(".."), "encrypted");
        assert_eq!(sibling, canonical.with_file_name("docs_encrypted"));
        assert!(!sibling.starts_with(&canonical));
    }

    #[test]
    fn mirrors_nested_paths() {
        let out = mirrored_path(
            Path::new("src"),
            Path::new("src/a/b.txt"),
            Path::new("src_encrypted"),
            encrypted_file_path,
        );
        assert_eq!(out, PathBuf::from("src_encrypted/a/b.txt.encrypted"));
    }
}
