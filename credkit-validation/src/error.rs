//! Validation failures and configuration errors.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type for building validation configuration.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while building rules from configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A declarative rule cannot be turned into a predicate.
    #[error("invalid rule for field '{field}': {reason}")]
    InvalidRule { field: String, reason: String },
}

/// One rejected value: the field it was written to, the rule's message and
/// the value itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub path: String,
    pub message: String,
    pub value: Value,
}

impl ValidationFailure {
    pub fn new(path: impl Into<String>, message: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            value,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every failure recorded against a document, in the order they occurred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<ValidationFailure>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, failure: ValidationFailure) {
        self.0.push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationFailure> {
        self.0.iter()
    }

    /// Failures recorded for one field.
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationFailure> {
        self.0.iter().filter(move |f| f.path == path)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn into_vec(self) -> Vec<ValidationFailure> {
        self.0
    }
}

impl From<Vec<ValidationFailure>> for ValidationErrors {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        Self(failures)
    }
}

impl Extend<ValidationFailure> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationFailure>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
