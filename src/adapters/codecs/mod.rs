pub mod aes_gcm;
pub mod chacha20;
pub mod rsa_hybrid;

use crate::core::models::algorithm::Algorithm;
use crate::core::traits::codec::AlgorithmCodec;

use self::aes_gcm::AesGcmCodec;
use self::chacha20::ChaCha20Codec;
use self::rsa_hybrid::RsaHybridCodec;

/// The codec implementing `algorithm`.
pub fn codec_for(algorithm: Algorithm) -> &'static dyn AlgorithmCodec {
    match algorithm {
        Algorithm::Aes => &AesGcmCodec,
        Algorithm::ChaCha20 => &ChaCha20Codec,
        Algorithm::Rsa => &RsaHybridCodec,
    }
}
