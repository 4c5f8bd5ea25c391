//! Error types for the digest layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while computing digests.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key derivation parameters are out of range.
    #[error("invalid kdf parameters: {0}")]
    InvalidParams(String),

    /// Key derivation failed.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The MAC could not be keyed with the salt.
    #[error("invalid mac key: {0}")]
    InvalidKey(String),
}
