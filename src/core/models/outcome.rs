use std::path::PathBuf;

use serde::Serialize;

use crate::core::models::algorithm::Algorithm;

/// What a successful operation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Raw bytes, e.g. a codec's envelope.
    #[serde(serialize_with = "serialize_base64")]
    Bytes(Vec<u8>),
    /// Where the result was written (file or output directory).
    Path(PathBuf),
    /// Display text: base64 envelope after text encryption, plaintext after text decryption.
    Text(String),
}

fn serialize_base64<S: serde::Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    use base64::Engine as _;
    s.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Sizes and timing attached to every successful outcome.
///
/// For decryption `original_size` is the envelope size and
/// `encrypted_size` the recovered plaintext size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeMetadata {
    pub algorithm: Algorithm,
    pub original_size: u64,
    pub encrypted_size: u64,
    pub timestamp_millis: i64,
}

impl OutcomeMetadata {
    pub fn now(algorithm: Algorithm, original_size: u64, encrypted_size: u64) -> Self {
        Self {
            algorithm,
            original_size,
            encrypted_size,
            timestamp_millis: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Per-file result inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemOutcome {
    pub source: PathBuf,
    pub outcome: EncryptionOutcome,
}

/// Result of every public encrypt/decrypt operation.
///
/// Exactly one of `payload` / `error_message` is set, and `metadata`
/// is only present on success. Batch operations also list their
/// per-file results in `items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncryptionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OutcomeMetadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemOutcome>,
}

impl EncryptionOutcome {
    pub fn success(payload: Payload, metadata: OutcomeMetadata) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error_message: None,
            metadata: Some(metadata),
            items: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            error_message: Some(message.into()),
            metadata: None,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<ItemOutcome>) -> Self {
        self.items = items;
        self
    }

    pub fn original_size(&self) -> u64 {
        self.metadata.as_ref().map_or(0, |m| m.original_size)
    }

    pub fn encrypted_size(&self) -> u64 {
        self.metadata.as_ref().map_or(0, |m| m.encrypted_size)
    }

    /// Items that failed, in processing order.
    pub fn failed_items(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|item| !item.outcome.success)
    }
}
