//! Rules described as data.
//!
//! Predicates are closures and cannot be read from a settings file, so the
//! common checks are also available as [`RuleSpec`] values:
//!
//! ```json
//! { "rule": "min_trimmed_length", "min": 12, "message": "Too short" }
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::rule::{Rule, RuleSet};
use serde::{Deserialize, Serialize};

/// The check a [`RuleSpec`] performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleKind {
    /// Value is present and is not an empty string.
    Required,
    /// String whose trimmed length is strictly greater than `min`.
    MinTrimmedLength { min: usize },
    /// Absent, or a string of at most `max` characters.
    MaxLength { max: usize },
    /// String equal to one of `values`.
    OneOf { values: Vec<String> },
}

/// A declarative rule: a [`RuleKind`] plus an optional failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(flatten)]
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleSpec {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Builds the runtime rule. `field` only feeds error messages.
    pub fn into_rule(self, field: &str) -> ValidationResult<Rule> {
        let rule = match self.kind {
            RuleKind::Required => Rule::new(|value| match value.as_str() {
                Some(s) => !s.is_empty(),
                None => !value.is_null(),
            }),
            RuleKind::MinTrimmedLength { min } => {
                Rule::text(move |s| s.is_some_and(|s| s.trim().chars().count() > min))
            }
            RuleKind::MaxLength { max } => Rule::new(move |value| match value.as_str() {
                Some(s) => s.chars().count() <= max,
                None => value.is_null(),
            }),
            RuleKind::OneOf { values } => {
                if values.is_empty() {
                    return Err(ValidationError::InvalidRule {
                        field: field.to_string(),
                        reason: "one_of requires at least one value".to_string(),
                    });
                }
                Rule::text(move |s| s.is_some_and(|s| values.iter().any(|v| v == s)))
            }
        };
        Ok(match self.message {
            Some(message) => rule.with_message(message),
            None => rule,
        })
    }
}

/// Either a single item or a list of them; both shapes deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl OneOrMany<RuleSpec> {
    /// Builds the rule set for `field`, failing on the first invalid spec.
    /// A lone spec yields a single-rule set, a list yields a list.
    pub fn into_rule_set(self, field: &str) -> ValidationResult<RuleSet> {
        match self {
            Self::One(spec) => spec.into_rule(field).map(RuleSet::from),
            Self::Many(specs) => specs
                .into_iter()
                .map(|spec| spec.into_rule(field))
                .collect(),
        }
    }
}
