use aes_gcm::AesGcm;
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::errors::{EncryptzError, Result};
use crate::core::models::algorithm::Algorithm;
use crate::core::models::request::EncryptionRequest;
use crate::core::services::key_derivation::{self, KEY_LENGTH};
use crate::core::traits::codec::AlgorithmCodec;

/// AES-256-GCM with a 16-byte IV instead of the usual 12.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

pub const IV_LENGTH: usize = 16;
pub const TAG_LENGTH: usize = 16;

/// AES-256-GCM codec.
///
/// Envelope: `IV(16) || TAG(16) || CIPHERTEXT`.
pub struct AesGcmCodec;

impl AesGcmCodec {
    fn cipher(key: &[u8]) -> Result<Aes256Gcm16> {
        Aes256Gcm16::new_from_slice(key).map_err(|_| EncryptzError::InvalidKeyMaterial {
            detail: format!("AES-256 key must be {KEY_LENGTH} bytes, got {}", key.len()),
        })
    }
}

impl AlgorithmCodec for AesGcmCodec {
    fn encrypt(&self, data: &[u8], request: &EncryptionRequest) -> Result<Vec<u8>> {
        // Without a password the key is random and the envelope cannot be
        // opened again; the orchestrators always supply one.
        let key = match request.password() {
            Some(password) => key_derivation::derive_key(password, Algorithm::Aes)?,
            None => {
                let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
                OsRng.fill_bytes(key.as_mut());
                key
            }
        };

        let mut iv = [0u8; IV_LENGTH];
        OsRng.fill_bytes(&mut iv);

        let mut buffer = data.to_vec();
        let tag = Self::cipher(key.as_ref())?
            .encrypt_in_place_detached(GenericArray::from_slice(&iv), b"", &mut buffer)
            .map_err(|_| EncryptzError::EncryptionFailed {
                reason: "AES-GCM encryption failed".into(),
            })?;

        let mut envelope = Vec::with_capacity(IV_LENGTH + TAG_LENGTH + buffer.len());
        envelope.extend_from_slice(&iv);
        envelope.extend_from_slice(&tag);
        envelope.extend_from_slice(&buffer);

        debug!(
            plaintext = data.len(),
            envelope = envelope.len(),
            "aes-gcm encrypt"
        );
        Ok(envelope)
    }

    fn decrypt(&self, envelope: &[u8], request: &EncryptionRequest) -> Result<Vec<u8>> {
        let password = request.password().ok_or(EncryptzError::PasswordRequired {
            algorithm: Algorithm::Aes,
            operation: "decryption",
        })?;

        let header = IV_LENGTH + TAG_LENGTH;
        if envelope.len() < header {
            return Err(EncryptzError::MalformedEnvelope {
                algorithm: Algorithm::Aes,
                detail: format!("too small ({} < {header} bytes)", envelope.len()),
            });
        }

        let key = key_derivation::derive_key(password, Algorithm::Aes)?;
        let (iv, rest) = envelope.split_at(IV_LENGTH);
        let (tag, ciphertext) = rest.split_at(TAG_LENGTH);

        let mut buffer = ciphertext.to_vec();
        Self::cipher(key.as_ref())?
            .decrypt_in_place_detached(
                GenericArray::from_slice(iv),
                b"",
                &mut buffer,
                GenericArray::from_slice(tag),
            )
            .map_err(|_| EncryptzError::AuthenticationFailed {
                algorithm: Algorithm::Aes,
            })?;

        debug!(
            envelope = envelope.len(),
            plaintext = buffer.len(),
            "aes-gcm decrypt"
        );
        Ok(buffer)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Aes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;

    fn request(password: &str) -> EncryptionRequest {
        EncryptionRequest::new(Algorithm::Aes).with_password(password)
    }

    #[test]
    fn round_trip() {
        let req = request("Str0ngPass!");
        let envelope = AesGcmCodec.encrypt(b"Hello World", &req).unwrap();
        assert_eq!(envelope.len(), IV_LENGTH + TAG_LENGTH + 11);

        let plaintext = AesGcmCodec.decrypt(&envelope, &req).unwrap();
        assert_eq!(plaintext, b"Hello World");
    }

    #[test]
    fn round_trip_empty_buffer() {
        let req = request("Str0ngPass!");
        let envelope = AesGcmCodec.encrypt(b"", &req).unwrap();
        assert_eq!(envelope.len(), IV_LENGTH + TAG_LENGTH);
        assert!(AesGcmCodec.decrypt(&envelope, &req).unwrap().is_empty());
    }

    #[test]
    fn fresh_iv_per_call() {
        let req = request("Str0ngPass!");
        let a = AesGcmCodec.encrypt(b"same input", &req).unwrap();
        let b = AesGcmCodec.encrypt(b"same input", &req).unwrap();
        assert_ne!(a[..IV_LENGTH], b[..IV_LENGTH]);
        assert_ne!(a, b);
    }

    #[test]
    fn tampering_tag_or_ciphertext_fails() {
        let req = request("Str0ngPass!");
        let envelope = AesGcmCodec.encrypt(b"attack at dawn", &req).unwrap();

        for index in IV_LENGTH..envelope.len() {
            let mut tampered = envelope.clone();
            tampered[index] ^= 1 << (index % 8);
            let err = AesGcmCodec.decrypt(&tampered, &req).unwrap_err();
            assert!(
                matches!(err, EncryptzError::AuthenticationFailed { .. }),
                "byte {index}: {err}"
            );
        }
    }

    #[test]
    fn wrong_password_fails() {
        let envelope = AesGcmCodec
            .encrypt(b"secret", &request("Str0ngPass!"))
            .unwrap();
        let err = AesGcmCodec
            .decrypt(&envelope, &request("Wr0ngPass!"))
            .unwrap_err();
        assert!(matches!(err, EncryptzError::AuthenticationFailed { .. }));
    }

    #[test]
    fn decrypt_requires_password() {
        let envelope = AesGcmCodec
            .encrypt(b"secret", &request("Str0ngPass!"))
            .unwrap();
        let err = AesGcmCodec
            .decrypt(&envelope, &EncryptionRequest::new(Algorithm::Aes))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(
            err.to_string()
                .contains("Password is required for AES decryption")
        );
    }

    #[test]
    fn truncated_envelope_is_malformed() {
        let err = AesGcmCodec
            .decrypt(&[0u8; 20], &request("Str0ngPass!"))
            .unwrap_err();
        assert!(matches!(err, EncryptzError::MalformedEnvelope { .. }));
    }
}
