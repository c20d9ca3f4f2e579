use crate::core::errors::Result;
use crate::core::models::algorithm::Algorithm;
use crate::core::models::request::EncryptionRequest;

/// Port for the per-algorithm wire-format codecs.
///
/// Implementations live in `adapters::codecs` (AesGcmCodec, ChaCha20Codec,
/// RsaHybridCodec). Every envelope a codec produces is self-describing:
/// `decrypt` needs only the envelope and, for symmetric codecs, the password.
pub trait AlgorithmCodec: Send + Sync {
    /// Encrypt one buffer into this codec's envelope format.
    fn encrypt(&self, data: &[u8], request: &EncryptionRequest) -> Result<Vec<u8>>;

    /// Recover the plaintext from an envelope, verifying integrity where the
    /// format carries an authentication tag.
    fn decrypt(&self, envelope: &[u8], request: &EncryptionRequest) -> Result<Vec<u8>>;

    /// The algorithm this codec implements.
    fn algorithm(&self) -> Algorithm;
}
