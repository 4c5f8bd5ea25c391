use crate::error::ValidationFailure;
use crate::rule::RuleSet;
use serde_json::Value;

/// Runs every rule in `rules` against `candidate`.
///
/// Rules are evaluated in order and evaluation never stops early: the result
/// holds one failure per rejecting rule, in rule order. An empty result means
/// the value passed.
pub fn validate(field: &str, candidate: &Value, rules: &RuleSet) -> Vec<ValidationFailure> {
    rules
        .iter()
        .filter(|rule| !rule.check(candidate))
        .map(|rule| {
            let message = rule
                .message()
                .map(str::to_owned)
                .unwrap_or_else(|| fallback_message(field));
            ValidationFailure::new(field, message, candidate.clone())
        })
        .collect()
}

/// Message used when a failing rule carries none: `"Password is invalid"`
/// for the `password` field.
pub fn fallback_message(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("{}{} is invalid", first.to_uppercase(), chars.as_str()),
        None => "Value is invalid".to_string(),
    }
}
