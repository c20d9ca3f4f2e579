use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

use crate::adapters::codecs::codec_for;
use crate::core::errors::{EncryptzError, Result};
use crate::core::models::outcome::{EncryptionOutcome, ItemOutcome, OutcomeMetadata, Payload};
use crate::core::models::request::EncryptionRequest;
use crate::core::services::batch::{self, BatchItem};
use crate::core::services::output_paths::{encrypted_file_path, mirrored_path, sibling_directory};
use crate::core::services::password_policy::validate_password;
use crate::core::services::progress::{self, ProgressFn};
use crate::core::traits::directory_listing::DirectoryListing;
use crate::core::traits::file_system::FileSystemAccess;

/// Orchestrates encryption of text, files and directories by combining a
/// `FileSystemAccess` with a `DirectoryListing` and the algorithm codecs.
///
/// Every public operation returns an `EncryptionOutcome`; errors never
/// escape as `Err`.
pub struct Encryptor<F: FileSystemAccess, D: DirectoryListing> {
    pub fs: F,
    pub scanner: D,
}

impl<F: FileSystemAccess, D: DirectoryListing> Encryptor<F, D> {
    pub fn new(fs: F, scanner: D) -> Self {
        Self { fs, scanner }
    }

    /// Encrypt an in-memory buffer; the payload is the raw envelope.
    ///
    /// No password strength check is applied here, only presence.
    pub fn encrypt_bytes(&self, data: &[u8], request: &EncryptionRequest) -> EncryptionOutcome {
        batch::into_outcome(self.try_encrypt_bytes(data, request), "encrypt bytes")
    }

    /// Encrypt a UTF-8 string; the payload is the base64 of the envelope.
    pub fn encrypt_text(&self, text: &str, request: &EncryptionRequest) -> EncryptionOutcome {
        let outcome = self.encrypt_bytes(text.as_bytes(), request);
        match outcome {
            EncryptionOutcome {
                success: true,
                payload: Some(Payload::Bytes(envelope)),
                metadata: Some(metadata),
                ..
            } => EncryptionOutcome::success(Payload::Text(STANDARD.encode(envelope)), metadata),
            other => other,
        }
    }

    /// Encrypt one file to `request.output_path`, or `<input>.encrypted`.
    pub fn encrypt_file(
        &self,
        path: &Path,
        request: &EncryptionRequest,
        progress: Option<&ProgressFn<'_>>,
    ) -> EncryptionOutcome {
        batch::into_outcome(self.try_encrypt_file(path, request, progress), "encrypt file")
    }

    /// Encrypt every file below `dir`, mirroring the tree into
    /// `request.output_path` or the sibling `<dir>_encrypted`.
    ///
    /// A failing file does not stop the batch; the outcome only succeeds if
    /// every file did.
    pub fn encrypt_directory(
        &self,
        dir: &Path,
        request: &EncryptionRequest,
        progress: Option<&ProgressFn<'_>>,
    ) -> EncryptionOutcome {
        batch::into_outcome(
            self.try_encrypt_directory(dir, request, progress),
            "encrypt directory",
        )
    }

    /// Encrypt several files, one outcome per input in order.
    ///
    /// With an output path set, results land in that directory as
    /// `<name>.encrypted`; otherwise next to each input. A later input whose
    /// name collides with an earlier one in that directory fails instead of
    /// overwriting it.
    pub fn encrypt_files(
        &self,
        paths: &[PathBuf],
        request: &EncryptionRequest,
        progress: Option<&ProgressFn<'_>>,
    ) -> Vec<EncryptionOutcome> {
        let items: Vec<BatchItem> = paths
            .iter()
            .map(|path| BatchItem {
                source: path.clone(),
                destination: request.output_path.as_deref().map(|out| {
                    out.join(encrypted_file_path(Path::new(
                        path.file_name().unwrap_or(path.as_os_str()),
                    )))
                }),
            })
            .collect();

        self.run(&items, request, progress)
            .into_iter()
            .map(|item| item.outcome)
            .collect()
    }

    fn run(
        &self,
        items: &[BatchItem],
        request: &EncryptionRequest,
        progress: Option<&ProgressFn<'_>>,
    ) -> Vec<ItemOutcome> {
        batch::run_batch(items, progress, |item, item_progress| {
            let item_request = match &item.destination {
                Some(dest) => request.redirected(dest.clone()),
                None => request.clone(),
            };
            self.encrypt_file(&item.source, &item_request, item_progress)
        })
    }

    fn try_encrypt_bytes(
        &self,
        data: &[u8],
        request: &EncryptionRequest,
    ) -> Result<EncryptionOutcome> {
        batch::require_password(request, "encryption")?;
        let codec = codec_for(request.algorithm);
        let envelope = codec.encrypt(data, request)?;
        debug!(
            algorithm = %codec.algorithm(),
            input = data.len(),
            output = envelope.len(),
            "encrypted buffer"
        );

        let metadata =
            OutcomeMetadata::now(request.algorithm, data.len() as u64, envelope.len() as u64);
        Ok(EncryptionOutcome::success(Payload::Bytes(envelope), metadata))
    }

    fn check_request(request: &EncryptionRequest) -> Result<()> {
        batch::require_password(request, "encryption")?;
        if let Some(password) = request
            .password()
            .filter(|_| request.algorithm.needs_password())
        {
            validate_password(password)?;
        }
        Ok(())
    }

    fn try_encrypt_file(
        &self,
        path: &Path,
        request: &EncryptionRequest,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<EncryptionOutcome> {
        if !self.fs.exists(path) {
            return Err(EncryptzError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::check_request(request)?;

        let label = batch::file_label(path);
        let data = self.fs.read_whole(path)?;
        progress::report(progress, progress::FILE_STARTED, progress::FILE_TOTAL, Some(&label));

        let envelope = codec_for(request.algorithm).encrypt(&data, request)?;
        progress::report(progress, progress::FILE_TRANSFORMED, progress::FILE_TOTAL, Some(&label));

        let output = request
            .output_path
            .clone()
            .unwrap_or_else(|| encrypted_file_path(path));
        self.fs.write_whole(&output, &envelope)?;
        progress::report(progress, progress::FILE_WRITTEN, progress::FILE_TOTAL, Some(&label));

        info!(
            algorithm = %request.algorithm,
            input = %path.display(),
            output = %output.display(),
            "encrypted file"
        );
        let metadata =
            OutcomeMetadata::now(request.algorithm, data.len() as u64, envelope.len() as u64);
        Ok(EncryptionOutcome::success(Payload::Path(output), metadata))
    }

    fn try_encrypt_directory(
        &self,
        dir: &Path,
        request: &EncryptionRequest,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<EncryptionOutcome> {
        if !self.fs.is_dir(dir) {
            return Err(EncryptzError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        Self::check_request(request)?;

        let files = self.scanner.scan(dir, true)?;
        let out_dir = request
            .output_path
            .clone()
            .unwrap_or_else(|| sibling_directory(dir, "encrypted"));
        self.fs.ensure_dir(&out_dir)?;
        info!(
            dir = %dir.display(),
            out_dir = %out_dir.display(),
            files = files.len(),
            "encrypting directory"
        );

        let items: Vec<BatchItem> = files
            .into_iter()
            .filter(|file| !file.is_directory)
            .map(|file| {
                debug!(
                    file = %file.name,
                    extension = %file.extension,
                    size = file.size,
                    "queued"
                );
                BatchItem {
                    destination: Some(mirrored_path(
                        dir,
                        &file.path,
                        &out_dir,
                        encrypted_file_path,
                    )),
                    source: file.path,
                }
            })
            .collect();

        let results = self.run(&items, request, progress);
        Ok(batch::aggregate(request.algorithm, Payload::Path(out_dir), results))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Mutex;

    use super::*;
    use crate::adapters::fs::directory_scanner::DirectoryScanner;
    use crate::adapters::fs::local_fs::LocalFileSystem;
    use crate::core::models::algorithm::Algorithm;

    const PASSWORD: &str = "Str0ngPass!";

    fn encryptor() -> Encryptor<LocalFileSystem, DirectoryScanner> {
        Encryptor::new(LocalFileSystem, DirectoryScanner)
    }

    fn aes() -> EncryptionRequest {
        EncryptionRequest::new(Algorithm::Aes).with_password(PASSWORD)
    }

    #[test]
    fn text_payload_is_base64_envelope() {
        let outcome = encryptor().encrypt_text("Hello World", &aes());
        assert!(outcome.success);

        let Some(Payload::Text(encoded)) = &outcome.payload else {
            panic!("expected text payload, got {:?}", outcome.payload);
        };
        let envelope = STANDARD.decode(encoded).unwrap();
        assert_eq!(envelope.len(), 16 + 16 + 11);

        let meta = outcome.metadata.unwrap();
        assert_eq!(meta.algorithm, Algorithm::Aes);
        assert_eq!(meta.original_size, 11);
        assert_eq!(meta.encrypted_size, 43);
    }

    #[test]
    fn text_requires_password_but_not_strength() {
        let missing = encryptor().encrypt_text("hi", &EncryptionRequest::new(Algorithm::ChaCha20));
        assert!(!missing.success);
        assert!(
            missing
                .error_message
                .as_deref()
                .unwrap()
                .contains("Password is required")
        );

        let weak = EncryptionRequest::new(Algorithm::ChaCha20).with_password("weak");
        assert!(encryptor().encrypt_text("hi", &weak).success);
    }

    #[test]
    fn bytes_payload_is_raw_envelope() {
        let outcome = encryptor().encrypt_bytes(b"abc", &aes());
        assert!(matches!(outcome.payload, Some(Payload::Bytes(ref b)) if b.len() == 35));
    }

    #[test]
    fn file_default_output_appends_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("note.txt");
        fs::write(&input, "secret note").unwrap();

        let outcome = encryptor().encrypt_file(&input, &aes(), None);
        assert!(outcome.success, "{:?}", outcome.error_message);
        let expected = dir.path().join("note.txt.encrypted");
        assert_eq!(outcome.payload, Some(Payload::Path(expected.clone())));
        assert_eq!(fs::metadata(&expected).unwrap().len(), 11 + 32);
        assert_eq!(outcome.original_size(), 11);
        assert_eq!(outcome.encrypted_size(), 43);
    }

    #[test]
    fn file_weak_password_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("note.txt");
        fs::write(&input, "x").unwrap();

        let request = EncryptionRequest::new(Algorithm::Aes).with_password("short");
        let outcome = encryptor().encrypt_file(&input, &request, None);
        assert!(!outcome.success);
        assert!(
            outcome
                .error_message
                .as_deref()
                .unwrap()
                .contains("at least 8 characters")
        );
        assert!(!dir.path().join("note.txt.encrypted").exists());
    }

    #[test]
    fn file_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = encryptor().encrypt_file(&dir.path().join("ghost.txt"), &aes(), None);
        assert!(!outcome.success);
        assert!(
            outcome
                .error_message
                .as_deref()
                .unwrap()
                .contains("ghost.txt")
        );
    }

    #[test]
    fn file_progress_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("p.bin");
        fs::write(&input, [7u8; 64]).unwrap();

        let seen = Mutex::new(Vec::new());
        let cb = |c: u64, t: u64, l: Option<&str>| {
            seen.lock().unwrap().push((c, t, l.map(str::to_owned)));
        };
        assert!(encryptor().encrypt_file(&input, &aes(), Some(&cb)).success);

        let seen = seen.into_inner().unwrap();
        let steps: Vec<u64> = seen.iter().map(|(c, _, _)| *c).collect();
        assert_eq!(steps, [0, 50, 100]);
        assert!(
            seen.iter()
                .all(|(_, t, l)| *t == 100 && l.as_deref() == Some("p.bin"))
        );
    }

    #[test]
    fn rsa_file_ignores_password() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("r.txt");
        fs::write(&input, "rsa body").unwrap();

        let outcome =
            encryptor().encrypt_file(&input, &EncryptionRequest::new(Algorithm::Rsa), None);
        assert!(outcome.success, "{:?}", outcome.error_message);
        assert!(outcome.encrypted_size() > outcome.original_size());
    }

    #[test]
    fn directory_mirrors_tree_into_sibling() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("docs");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("a.txt"), "aaaa").unwrap();
        fs::write(dir.join("nested/b.txt"), "bb").unwrap();

        let request = EncryptionRequest::new(Algorithm::ChaCha20).with_password(PASSWORD);
        let outcome = encryptor().encrypt_directory(&dir, &request, None);
        assert!(outcome.success, "{:?}", outcome.error_message);

        let out = root.path().join("docs_encrypted");
        assert_eq!(outcome.payload, Some(Payload::Path(out.clone())));
        assert!(out.join("a.txt.encrypted").is_file());
        assert!(out.join("nested/b.txt.encrypted").is_file());
        assert_eq!(outcome.original_size(), 6);
        assert_eq!(outcome.encrypted_size(), 6 + 2 * 28);
        assert_eq!(outcome.items.len(), 2);
    }

    #[test]
    fn directory_weak_password_fails_upfront() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("a.txt"), "a").unwrap();

        let request = EncryptionRequest::new(Algorithm::Aes).with_password("alllowercase1!");
        let outcome = encryptor().encrypt_directory(root.path(), &request, None);
        assert!(!outcome.success);
        assert!(outcome.items.is_empty());
        assert!(
            outcome
                .error_message
                .as_deref()
                .unwrap()
                .contains("uppercase")
        );
    }

    #[test]
    fn empty_directory_succeeds_without_progress() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("empty");
        fs::create_dir(&dir).unwrap();

        let calls = Mutex::new(0);
        let cb = |_: u64, _: u64, _: Option<&str>| *calls.lock().unwrap() += 1;
        let outcome = encryptor().encrypt_directory(&dir, &aes(), Some(&cb));

        assert!(outcome.success);
        assert_eq!(outcome.original_size(), 0);
        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(root.path().join("empty_encrypted").is_dir());
    }

    #[test]
    fn directory_progress_is_monotonic_and_finishes_once() {
        let root = tempfile::tempdir().unwrap();
        for name in ["1", "2", "3", "4", "5"] {
            fs::write(root.path().join(name), name).unwrap();
        }
        let out = tempfile::tempdir().unwrap();

        let seen = Mutex::new(Vec::new());
        let cb = |c: u64, _: u64, _: Option<&str>| seen.lock().unwrap().push(c);
        let request = aes().with_output(out.path());
        assert!(
            encryptor()
                .encrypt_directory(root.path(), &request, Some(&cb))
                .success
        );

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 15);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.iter().filter(|&&p| p == 100).count(), 1);
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn not_a_directory_fails() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let outcome = encryptor().encrypt_directory(&file, &aes(), None);
        assert!(!outcome.success);
        assert!(
            outcome
                .error_message
                .as_deref()
                .unwrap()
                .contains("plain.txt")
        );
    }

    #[test]
    fn multiple_files_into_output_directory() {
        let root = tempfile::tempdir().unwrap();
        let a = root.path().join("a.txt");
        let b = root.path().join("b.txt");
        fs::write(&a, "A").unwrap();
        fs::write(&b, "B").unwrap();
        let missing = root.path().join("missing.txt");
        let out = root.path().join("out");

        let request = aes().with_output(&out);
        let outcomes = encryptor().encrypt_files(&[a, missing, b], &request, None);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].success);
        assert!(!outcomes[1].success);
        assert!(outcomes[2].success);
        assert!(out.join("a.txt.encrypted").is_file());
        assert!(out.join("b.txt.encrypted").is_file());
    }

    #[test]
    fn same_file_name_into_output_directory_is_not_overwritten() {
        let root = tempfile::tempdir().unwrap();
        let first = root.path().join("x").join("notes.txt");
        let second = root.path().join("y").join("notes.txt");
        fs::create_dir_all(first.parent().unwrap()).unwrap();
        fs::create_dir_all(second.parent().unwrap()).unwrap();
        fs::write(&first, "from x").unwrap();
        fs::write(&second, "from y, longer").unwrap();
        let out = root.path().join("out");

        let request = aes().with_output(&out);
        let outcomes = encryptor().encrypt_files(&[first, second], &request, None);

        assert!(outcomes[0].success);
        assert!(!outcomes[1].success);
        assert!(
            outcomes[1]
                .error_message
                .as_deref()
                .unwrap()
                .starts_with("Output collision")
        );

        let written: Vec<_> = fs::read_dir(&out).unwrap().collect();
        assert_eq!(written.len(), 1);
        let sealed = fs::read(out.join("notes.txt.encrypted")).unwrap();
        assert_eq!(sealed.len(), "from x".len() + 32);
    }
}
