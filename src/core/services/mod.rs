pub mod batch;
pub mod decryptor;
pub mod encryptor;
pub mod key_derivation;
pub mod output_paths;
pub mod password_policy;
pub mod progress;
