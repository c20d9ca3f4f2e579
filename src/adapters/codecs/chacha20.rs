use chacha20poly1305::aead::{AeadInPlace, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce, Tag};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::errors::{EncryptzError, Result};
use crate::core::models::algorithm::Algorithm;
use crate::core::models::request::EncryptionRequest;
use crate::core::services::key_derivation::{self, KEY_LENGTH};
use crate::core::traits::codec::AlgorithmCodec;

pub const NONCE_LENGTH: usize = 12;
pub const TAG_LENGTH: usize = 16;

/// ChaCha20-Poly1305 codec.
///
/// Envelope: `NONCE(12) || TAG(16) || CIPHERTEXT`. Key, nonce and tag
/// lengths are checked up front so a bad envelope is reported with a
/// precise message instead of a generic primitive failure.
pub struct ChaCha20Codec;

impl ChaCha20Codec {
    fn check_length(what: &str, expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(EncryptzError::MalformedEnvelope {
                algorithm: Algorithm::ChaCha20,
                detail: format!("invalid {what} length: expected {expected}, got {actual}"),
            });
        }
        Ok(())
    }

    fn check_key(key: &[u8]) -> Result<()> {
        if key.len() != KEY_LENGTH {
            return Err(EncryptzError::InvalidKeyMaterial {
                detail: format!(
                    "invalid key length: expected {KEY_LENGTH}, got {}",
                    key.len()
                ),
            });
        }
        Ok(())
    }
}

impl AlgorithmCodec for ChaCha20Codec {
    fn encrypt(&self, data: &[u8], request: &EncryptionRequest) -> Result<Vec<u8>> {
        let key = match request.password() {
            Some(password) => key_derivation::derive_key(password, Algorithm::ChaCha20)?,
            None => {
                let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
                OsRng.fill_bytes(key.as_mut());
                key
            }
        };

        let mut nonce = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce);

        Self::check_key(key.as_ref())?;
        Self::check_length("nonce", NONCE_LENGTH, nonce.len())?;

        let cipher = ChaCha20Poly1305::new_from_slice(key.as_ref()).map_err(|_| {
            EncryptzError::InvalidKeyMaterial {
                detail: "ChaCha20 key rejected".into(),
            }
        })?;

        let mut buffer = data.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer)
            .map_err(|_| EncryptzError::EncryptionFailed {
                reason: "ChaCha20-Poly1305 encryption failed".into(),
            })?;

        let mut envelope = Vec::with_capacity(NONCE_LENGTH + TAG_LENGTH + buffer.len());
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&tag);
        envelope.extend_from_slice(&buffer);

        debug!(
            plaintext = data.len(),
            envelope = envelope.len(),
            "chacha20 encrypt"
        );
        Ok(envelope)
    }

    fn decrypt(&self, envelope: &[u8], request: &EncryptionRequest) -> Result<Vec<u8>> {
        let password = request.password().ok_or(EncryptzError::PasswordRequired {
            algorithm: Algorithm::ChaCha20,
            operation: "decryption",
        })?;

        let min_size = NONCE_LENGTH + TAG_LENGTH;
        if envelope.len() < min_size {
            return Err(EncryptzError::MalformedEnvelope {
                algorithm: Algorithm::ChaCha20,
                detail: format!("too small ({} < {min_size} bytes)", envelope.len()),
            });
        }

        let key = key_derivation::derive_key(password, Algorithm::ChaCha20)?;
        Self::check_key(key.as_ref())?;

        let (nonce, rest) = envelope.split_at(NONCE_LENGTH);
        let (tag, ciphertext) = rest.split_at(TAG_LENGTH);
        Self::check_length("nonce", NONCE_LENGTH, nonce.len())?;
        Self::check_length("tag", TAG_LENGTH, tag.len())?;

        let cipher = ChaCha20Poly1305::new_from_slice(key.as_ref()).map_err(|_| {
            EncryptzError::InvalidKeyMaterial {
                detail: "ChaCha20 key rejected".into(),
            }
        })?;

        let mut buffer = ciphertext.to_vec();
        cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(nonce),
                b"",
                &mut buffer,
                Tag::from_slice(tag),
            )
            .map_err(|_| EncryptzError::AuthenticationFailed {
                algorithm: Algorithm::ChaCha20,
            })?;

        debug!(
            envelope = envelope.len(),
            plaintext = buffer.len(),
            "chacha20 decrypt"
        );
        Ok(buffer)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::ChaCha20
    }
}
