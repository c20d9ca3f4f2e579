use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

use crate::adapters::codecs::codec_for;
use crate::core::errors::{EncryptzError, Result};
use crate::core::models::outcome::{EncryptionOutcome, ItemOutcome, OutcomeMetadata, Payload};
use crate::core::models::request::EncryptionRequest;
use crate::core::services::batch::{self, BatchItem};
use crate::core::services::output_paths::{
    decrypted_file_path, is_encrypted_name, mirrored_path, sibling_directory,
};
use crate::core::services::progress::{self, ProgressFn};
use crate::core::traits::directory_listing::DirectoryListing;
use crate::core::traits::file_system::FileSystemAccess;

/// Orchestrates decryption; the inverse of `Encryptor`.
///
/// In decryption metadata `original_size` is the envelope size and
/// `encrypted_size` the recovered plaintext size.
pub struct Decryptor<F: FileSystemAccess, D: DirectoryListing> {
    pub fs: F,
    pub scanner: D,
}

impl<F: FileSystemAccess, D: DirectoryListing> Decryptor<F, D> {
    pub fn new(fs: F, scanner: D) -> Self {
        Self { fs, scanner }
    }

    /// Decrypt a raw envelope held in memory.
    pub fn decrypt_bytes(&self, envelope: &[u8], request: &EncryptionRequest) -> EncryptionOutcome {
        batch::into_outcome(self.try_decrypt_bytes(envelope, request), "decrypt bytes")
    }

    /// Decrypt the base64 produced by text encryption back into a string.
    pub fn decrypt_text(&self, encoded: &str, request: &EncryptionRequest) -> EncryptionOutcome {
        let envelope = match decode_text(encoded) {
            Ok(envelope) => envelope,
            Err(e) => return batch::into_outcome(Err(e), "decrypt text"),
        };

        match self.decrypt_bytes(&envelope, request) {
            EncryptionOutcome {
                success: true,
                payload: Some(Payload::Bytes(plaintext)),
                metadata: Some(metadata),
                ..
            } => batch::into_outcome(
                into_text(plaintext, request)
                    .map(|text| EncryptionOutcome::success(Payload::Text(text), metadata)),
                "decrypt text",
            ),
            other => other,
        }
    }

    /// Decrypt one file to `request.output_path`, or the input with its
    /// `.encrypted` suffix removed (`.decrypted` appended when absent).
    pub fn decrypt_file(
        &self,
        path: &Path,
        request: &EncryptionRequest,
        progress: Option<&ProgressFn<'_>>,
    ) -> EncryptionOutcome {
        batch::into_outcome(self.try_decrypt_file(path, request, progress), "decrypt file")
    }

    /// Decrypt every `*.encrypted` file below `dir` into
    /// `request.output_path` or the sibling `<dir>_decrypted`.
    pub fn decrypt_directory(
        &self,
        dir: &Path,
        request: &EncryptionRequest,
        progress: Option<&ProgressFn<'_>>,
    ) -> EncryptionOutcome {
        batch::into_outcome(
            self.try_decrypt_directory(dir, request, progress),
            "decrypt directory",
        )
    }

    /// Decrypt several files, one outcome per input in order.
    pub fn decrypt_files(
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
                    out.join(decrypted_file_path(Path::new(
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
            self.decrypt_file(&item.source, &item_request, item_progress)
        })
    }

    fn open(envelope: &[u8], request: &EncryptionRequest) -> Result<Vec<u8>> {
        batch::require_password(request, "decryption")?;
        let codec = codec_for(request.algorithm);
        let plaintext = codec.decrypt(envelope, request)?;
        debug!(
            algorithm = %codec.algorithm(),
            input = envelope.len(),
            output = plaintext.len(),
            "decrypted buffer"
        );
        Ok(plaintext)
    }

    fn try_decrypt_bytes(
        &self,
        envelope: &[u8],
        request: &EncryptionRequest,
    ) -> Result<EncryptionOutcome> {
        let plaintext = Self::open(envelope, request)?;
        let metadata =
            OutcomeMetadata::now(request.algorithm, envelope.len() as u64, plaintext.len() as u64);
        Ok(EncryptionOutcome::success(Payload::Bytes(plaintext), metadata))
    }

    fn try_decrypt_file(
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
        batch::require_password(request, "decryption")?;

        let label = batch::file_label(path);
        let envelope = self.fs.read_whole(path)?;
        progress::report(progress, progress::FILE_STARTED, progress::FILE_TOTAL, Some(&label));

        let plaintext = Self::open(&envelope, request)?;
        progress::report(progress, progress::FILE_TRANSFORMED, progress::FILE_TOTAL, Some(&label));

        let output = request
            .output_path
            .clone()
            .unwrap_or_else(|| decrypted_file_path(path));
        self.fs.write_whole(&output, &plaintext)?;
        progress::report(progress, progress::FILE_WRITTEN, progress::FILE_TOTAL, Some(&label));

        info!(
            algorithm = %request.algorithm,
            input = %path.display(),
            output = %output.display(),
            "decrypted file"
        );
        let metadata =
            OutcomeMetadata::now(request.algorithm, envelope.len() as u64, plaintext.len() as u64);
        Ok(EncryptionOutcome::success(Payload::Path(output), metadata))
    }

    fn try_decrypt_directory(
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
        batch::require_password(request, "decryption")?;

        let files = self.scanner.scan(dir, true)?;
        let scanned = files.len();
        let out_dir = request
            .output_path
            .clone()
            .unwrap_or_else(|| sibling_directory(dir, "decrypted"));
        self.fs.ensure_dir(&out_dir)?;

        let items: Vec<BatchItem> = files
            .into_iter()
            .filter(|file| !file.is_directory && is_encrypted_name(&file.name))
            .map(|file| {
                debug!(file = %file.name, size = file.size, "queued");
                BatchItem {
                    destination: Some(mirrored_path(
                        dir,
                        &file.path,
                        &out_dir,
                        decrypted_file_path,
                    )),
                    source: file.path,
                }
            })
            .collect();
        info!(
            dir = %dir.display(),
            out_dir = %out_dir.display(),
            files = items.len(),
            skipped = scanned - items.len(),
            "decrypting directory"
        );

        let results = self.run(&items, request, progress);
        Ok(batch::aggregate(request.algorithm, Payload::Path(out_dir), results))
    }
}

fn decode_text(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| EncryptzError::InvalidInput {
            detail: format!("encrypted text is not valid base64 ({e})"),
        })
}

fn into_text(plaintext: Vec<u8>, request: &EncryptionRequest) -> Result<String> {
    String::from_utf8(plaintext).map_err(|_| EncryptzError::MalformedEnvelope {
        algorithm: request.algorithm,
        detail: "decrypted content is not valid UTF-8 text; decrypt it as a file instead".into(),
    })
}
