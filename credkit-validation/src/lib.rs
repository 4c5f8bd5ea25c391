//! Field validation for credkit documents.
//!
//! Defines the pieces every credkit subsystem validates with:
//! - [`Rule`] — a predicate over a candidate value plus an optional message
//! - [`RuleSet`] — the ordered rules attached to one field
//! - [`ValidationConfig`] — field name to rule set, deep-merged over built-in defaults
//! - [`validate`] — runs a rule set and collects every [`ValidationFailure`]
//! - [`RuleSpec`] — rules described as data, for configuration files
//!
//! Failures are values, not errors: callers decide whether to record them on
//! a document, reject a write, or ignore them.

mod config;
mod dispatch;
mod error;
mod rule;
mod spec;

pub use config::{
    DEFAULT_PASSWORD_MESSAGE, MIN_PASSWORD_LENGTH, PASSWORD_FIELD, ValidationConfig,
    default_password_rule,
};
pub use dispatch::{fallback_message, validate};
pub use error::{ValidationError, ValidationErrors, ValidationFailure, ValidationResult};
pub use rule::{Predicate, Rule, RuleSet};
pub use spec::{OneOrMany, RuleKind, RuleSpec};
