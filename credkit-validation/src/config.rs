use crate::rule::{Rule, RuleSet};
use std::collections::BTreeMap;

/// Name of the credential field validated by default.
pub const PASSWORD_FIELD: &str = "password";

/// A password passes the default rule when its trimmed length exceeds this.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Message reported by the default password rule.
pub const DEFAULT_PASSWORD_MESSAGE: &str = "Password must be at least 8 characters";

/// The built-in password rule: present, and longer than
/// [`MIN_PASSWORD_LENGTH`] characters once surrounding whitespace is trimmed.
pub fn default_password_rule() -> Rule {
    Rule::text(|password| {
        password.is_some_and(|p| p.trim().chars().count() > MIN_PASSWORD_LENGTH)
    })
    .with_message(DEFAULT_PASSWORD_MESSAGE)
}

/// Maps field names to the rules that validate them.
///
/// Built once at setup time. [`ValidationConfig::merged_over_defaults`]
/// produces a new value; nothing mutates the built-in defaults.
#[derive(Clone, Debug, Default)]
pub struct ValidationConfig {
    fields: BTreeMap<String, RuleSet>,
}

impl ValidationConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in defaults: one rule for `password`.
    pub fn defaults() -> Self {
        Self::new().with_field(PASSWORD_FIELD, vec![default_password_rule()])
    }

    /// Builder form of [`ValidationConfig::insert`].
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, rules: impl Into<RuleSet>) -> Self {
        self.insert(field, rules);
        self
    }

    /// Sets the rules for a field, replacing any previous set.
    pub fn insert(&mut self, field: impl Into<String>, rules: impl Into<RuleSet>) {
        self.fields.insert(field.into(), rules.into());
    }

    pub fn get(&self, field: &str) -> Option<&RuleSet> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Deep-merges this configuration over `defaults`.
    ///
    /// Fields present only in `defaults` are kept, fields present only here
    /// are added, and shared fields merge rule by rule (see
    /// [`RuleSet::merged_over`]).
    pub fn merged_over(self, defaults: &ValidationConfig) -> ValidationConfig {
        let mut fields = defaults.fields.clone();
        for (field, rules) in self.fields {
            let merged = match defaults.fields.get(&field) {
                Some(base) => rules.merged_over(base),
                None => rules,
            };
            fields.insert(field, merged);
        }
        ValidationConfig { fields }
    }

    /// Shorthand for `self.merged_over(&ValidationConfig::defaults())`.
    pub fn merged_over_defaults(self) -> ValidationConfig {
        self.merged_over(&Self::defaults())
    }
}
