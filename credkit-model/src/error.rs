//! Error types for the document model.

use crate::schema::FieldType;
use credkit_validation::ValidationErrors;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by schema setup and document access.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The path is neither a declared field nor a virtual field.
    #[error("unknown path: {path}")]
    UnknownPath { path: String },

    /// A value of the wrong type was written to a declared field.
    #[error("type mismatch at '{path}': expected {expected:?}")]
    TypeMismatch { path: String, expected: FieldType },

    /// A field or virtual with this path is already declared.
    #[error("path already declared: {path}")]
    DuplicatePath { path: String },

    /// Path validators can only attach to persisted fields.
    #[error("cannot register a validator on virtual path '{path}'")]
    VirtualPath { path: String },

    /// A virtual field's setter failed for a reason other than validation.
    #[error("virtual field '{path}' failed: {reason}")]
    Hook { path: String, reason: String },

    /// The document has recorded validation failures.
    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
