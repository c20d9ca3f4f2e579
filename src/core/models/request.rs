use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::core::models::algorithm::Algorithm;

/// Everything one encrypt/decrypt call needs besides its input.
///
/// The password is mandatory for AES and ChaCha20 and ignored for RSA,
/// whose keys are generated per call.
#[derive(Clone)]
pub struct EncryptionRequest {
    pub algorithm: Algorithm,
    pub password: Option<Zeroizing<String>>,
    pub output_path: Option<PathBuf>,
}

impl EncryptionRequest {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            password: None,
            output_path: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Zeroizing::new(password.into()));
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Borrow the password, treating an empty string as absent.
    pub fn password(&self) -> Option<&str> {
        self.password
            .as_ref()
            .map(|p| p.as_str())
            .filter(|p| !p.is_empty())
    }

    /// Same request, writing to `path` instead.
    pub(crate) fn redirected(&self, path: PathBuf) -> Self {
        Self {
            output_path: Some(path),
            ..self.clone()
        }
    }
}

impl std::fmt::Debug for EncryptionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionRequest")
            .field("algorithm", &self.algorithm)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("output_path", &self.output_path)
            .finish()
    }
}
