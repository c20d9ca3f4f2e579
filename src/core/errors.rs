use std::path::PathBuf;

use crate::core::models::algorithm::Algorithm;

/// Coarse classification of every failure the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any cryptographic work started.
    Validation,
    /// Raised by a codec: bad envelope, failed authentication, key trouble.
    Cryptographic,
    /// File or directory access failed.
    Io,
}

/// All domain errors for EncryptZ.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum EncryptzError {
    #[error(
        "Password is required for {algorithm} {operation}\n\n  \
         Pass it with --password, set ENCRYPTZ_PASSWORD, or enter it at the prompt."
    )]
    PasswordRequired {
        algorithm: Algorithm,
        operation: &'static str,
    },

    #[error("{reason}")]
    WeakPassword { reason: String },

    #[error(
        "Unsupported algorithm: '{name}'\n\n  \
         Supported algorithms: aes, chacha20, rsa\n  \
         Run 'encryptz algorithms' for details."
    )]
    UnsupportedAlgorithm { name: String },

    #[error(
        "File does not exist: {path}\n\n  \
         Check that the path is correct and the file exists."
    )]
    InputNotFound { path: PathBuf },

    #[error("Directory does not exist: {path}")]
    NotADirectory { path: PathBuf },

    #[error(
        "Output collision: {path} is already the destination of another input\n\n  \
         Inputs sharing a file name cannot go to the same --output directory."
    )]
    OutputConflict { path: PathBuf },

    #[error("Invalid input: {detail}")]
    InvalidInput { detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    #[error(
        "Decryption failed: {algorithm} authentication tag mismatch\n\n  \
         The password is wrong or the encrypted data was modified.\n  \
         Check the password and the --algorithm used to encrypt it."
    )]
    AuthenticationFailed { algorithm: Algorithm },

    #[error("Invalid {algorithm} encrypted data: {detail}")]
    MalformedEnvelope {
        algorithm: Algorithm,
        detail: String,
    },

    #[error("Invalid key material: {detail}")]
    InvalidKeyMaterial { detail: String },

    #[error("Invalid RSA envelope header: {detail}")]
    RsaHeader { detail: String },

    #[error("Failed to access {path}: {source}")]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EncryptzError {
    /// Which bucket of the error taxonomy this failure belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PasswordRequired { .. }
            | Self::WeakPassword { .. }
            | Self::UnsupportedAlgorithm { .. }
            | Self::InputNotFound { .. }
            | Self::NotADirectory { .. }
            | Self::OutputConflict { .. }
            | Self::InvalidInput { .. }
            | Self::InvalidConfig { .. } => ErrorKind::Validation,
            Self::EncryptionFailed { .. }
            | Self::AuthenticationFailed { .. }
            | Self::MalformedEnvelope { .. }
            | Self::InvalidKeyMaterial { .. }
            | Self::RsaHeader { .. } => ErrorKind::Cryptographic,
            Self::PathIo { .. } | Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Wrap an I/O error with the path it happened on.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PathIo {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EncryptzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let weak = EncryptzError::WeakPassword {
            reason: "too short".into(),
        };
        assert_eq!(weak.kind(), ErrorKind::Validation);

        let tag = EncryptzError::AuthenticationFailed {
            algorithm: Algorithm::Aes,
        };
        assert_eq!(tag.kind(), ErrorKind::Cryptographic);

        let io = EncryptzError::io_at(
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(io.to_string().contains("/tmp/x"));
    }

    #[test]
    fn password_required_names_algorithm() {
        let err = EncryptzError::PasswordRequired {
            algorithm: Algorithm::ChaCha20,
            operation: "decryption",
        };
        assert!(
            err.to_string()
                .starts_with("Password is required for CHACHA20 decryption")
        );
    }
}
