use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::EncryptzError;

/// The closed set of algorithms EncryptZ can encrypt with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// AES-256-GCM with a password-derived key.
    #[default]
    Aes,
    /// ChaCha20-Poly1305 with a password-derived key.
    #[serde(rename = "chacha20")]
    ChaCha20,
    /// One-time AES-256-CBC key wrapped with a fresh RSA-2048 keypair.
    Rsa,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Aes, Algorithm::ChaCha20, Algorithm::Rsa];

    /// Lowercase tag used on the command line, in config and in metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Aes => "aes",
            Algorithm::ChaCha20 => "chacha20",
            Algorithm::Rsa => "rsa",
        }
    }

    /// Whether this algorithm derives its key from a password.
    pub fn needs_password(self) -> bool {
        match self {
            Algorithm::Aes | Algorithm::ChaCha20 => true,
            Algorithm::Rsa => false,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for Algorithm {
    type Err = EncryptzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes" => Ok(Algorithm::Aes),
            "chacha20" => Ok(Algorithm::ChaCha20),
            "rsa" => Ok(Algorithm::Rsa),
            _ => Err(EncryptzError::UnsupportedAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}
