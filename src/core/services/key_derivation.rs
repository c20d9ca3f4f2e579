//! Password-based key derivation shared by the symmetric codecs.
//!
//! PBKDF2-HMAC-SHA512, 100,000 iterations, with a fixed salt per
//! algorithm. The salt is public and never stored in the envelope, so the
//! same password always yields the same key for a given algorithm on every
//! installation. That removes the usual protection salting gives against
//! precomputed tables; it is kept because existing envelopes depend on it.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::core::errors::{EncryptzError, Result};
use crate::core::models::algorithm::Algorithm;

pub const KEY_LENGTH: usize = 32;
pub const PBKDF2_ITERATIONS: u32 = 100_000;

const AES_SALT: &[u8] = b"encryptz-aes-salt";
const CHACHA20_SALT: &[u8] = b"encryptz-chacha20-salt";

/// Salt constant for an algorithm, `None` for algorithms without a password.
pub fn salt_for(algorithm: Algorithm) -> Option<&'static [u8]> {
    match algorithm {
        Algorithm::Aes => Some(AES_SALT),
        Algorithm::ChaCha20 => Some(CHACHA20_SALT),
        Algorithm::Rsa => None,
    }
}

/// Derive the 32-byte symmetric key for `algorithm` from `password`.
pub fn derive_key(password: &str, algorithm: Algorithm) -> Result<Zeroizing<[u8; KEY_LENGTH]>> {
    let salt = salt_for(algorithm).ok_or_else(|| EncryptzError::InvalidKeyMaterial {
        detail: format!("{algorithm} does not derive keys from a password"),
    })?;

    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, PBKDF2_ITERATIONS, key.as_mut());
    Ok(key)
}
