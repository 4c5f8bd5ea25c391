//! Error types for credential setup and updates.

use credkit_crypto::CryptoError;
use credkit_validation::ValidationError;
use thiserror::Error;

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Errors raised while configuring credentials or computing digests.
///
/// Rejected passwords are not errors: they are recorded on the document as
/// validation failures.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("invalid validation rule: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}
