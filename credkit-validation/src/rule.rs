use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Predicate evaluated against a candidate value. Returns `true` when the
/// value is acceptable.
pub type Predicate = dyn Fn(&Value) -> bool + Send + Sync;

/// A single validation rule: a predicate and the message reported when it
/// rejects a value.
#[derive(Clone)]
pub struct Rule {
    validator: Arc<Predicate>,
    message: Option<String>,
}

impl Rule {
    /// Creates a rule from a predicate over raw JSON values.
    pub fn new<F>(validator: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            validator: Arc::new(validator),
            message: None,
        }
    }

    /// Creates a rule over string values. Non-string candidates (including
    /// null) are passed to the predicate as `None`.
    pub fn text<F>(validator: F) -> Self
    where
        F: Fn(Option<&str>) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value| validator(value.as_str()))
    }

    /// Sets the message reported on failure.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the configured message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Evaluates the predicate.
    pub fn check(&self, value: &Value) -> bool {
        (self.validator)(value)
    }

    pub(crate) fn inherit_message(&mut self, fallback: &Rule) {
        if self.message.is_none() {
            self.message = fallback.message.clone();
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("validator", &"<fn>")
            .field("message", &self.message)
            .finish()
    }
}

/// The ordered rules attached to one field.
///
/// Built from either a single [`Rule`] or a `Vec<Rule>`, so configuration
/// can name one rule or many without the caller normalizing first. The
/// shape is remembered: it decides how the set merges over defaults.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    single: bool,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
        self.single = false;
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True when the set was given as one bare rule rather than a list.
    pub fn is_single(&self) -> bool {
        self.single
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Appends every rule of `other` after this set's rules.
    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
        self.single = false;
    }

    /// Merges this (caller-supplied) set over `defaults`.
    ///
    /// A single rule replaces the defaults outright and keeps its own
    /// message, or lack of one. A list merges position by position: the
    /// caller's rule at index *i* wins over the default at *i* and inherits
    /// its message when it has none; defaults past the end of the caller's
    /// list are kept.
    pub fn merged_over(mut self, defaults: &RuleSet) -> RuleSet {
        if self.single {
            return self;
        }
        for (rule, default) in self.rules.iter_mut().zip(defaults.iter()) {
            rule.inherit_message(default);
        }
        if defaults.len() > self.rules.len() {
            let kept = self.rules.len();
            self.rules.extend(defaults.rules[kept..].iter().cloned());
        }
        self
    }
}

impl From<Rule> for RuleSet {
    fn from(rule: Rule) -> Self {
        Self {
            rules: vec![rule],
            single: true,
        }
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            single: false,
        }
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
