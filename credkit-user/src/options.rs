use crate::error::CredentialResult;
use credkit_crypto::{DigestAlgorithm, SaltStrategy};
use credkit_validation::{OneOrMany, RuleSpec, ValidationConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Setup-time options for [`Credentials`](crate::Credentials).
///
/// `validations` holds only the caller's rules; the built-in password rule
/// is merged underneath when the options are turned into `Credentials`.
#[derive(Debug, Clone)]
pub struct CredentialOptions {
    /// Caller-supplied rules, keyed by field.
    pub validations: ValidationConfig,
    /// Store the digest even when the password failed validation.
    pub regenerate_on_invalid: bool,
    /// Let an empty guess authenticate against a record with no digest.
    pub accept_unset_credential: bool,
    pub digest: DigestAlgorithm,
    pub salt: SaltStrategy,
}

impl Default for CredentialOptions {
    fn default() -> Self {
        Self {
            validations: ValidationConfig::new(),
            regenerate_on_invalid: true,
            accept_unset_credential: false,
            digest: DigestAlgorithm::default(),
            salt: SaltStrategy::default(),
        }
    }
}

impl CredentialOptions {
    #[must_use]
    pub fn with_validations(mut self, validations: ValidationConfig) -> Self {
        self.validations = validations;
        self
    }

    #[must_use]
    pub fn regenerate_on_invalid(mut self, enabled: bool) -> Self {
        self.regenerate_on_invalid = enabled;
        self
    }

    #[must_use]
    pub fn accept_unset_credential(mut self, enabled: bool) -> Self {
        self.accept_unset_credential = enabled;
        self
    }

    #[must_use]
    pub fn with_digest(mut self, digest: DigestAlgorithm) -> Self {
        self.digest = digest;
        self
    }

    #[must_use]
    pub fn with_salt(mut self, salt: SaltStrategy) -> Self {
        self.salt = salt;
        self
    }

    /// Builds options from their serializable form.
    pub fn from_settings(settings: CredentialSettings) -> CredentialResult<Self> {
        let mut validations = ValidationConfig::new();
        for (field, specs) in settings.validations {
            let rules = specs.into_rule_set(&field)?;
            validations.insert(field, rules);
        }
        Ok(Self {
            validations,
            regenerate_on_invalid: settings.regenerate_on_invalid,
            accept_unset_credential: settings.accept_unset_credential,
            digest: settings.digest,
            salt: settings.salt,
        })
    }

    /// Parses [`CredentialSettings`] from JSON and builds options from them.
    pub fn from_json(json: &str) -> CredentialResult<Self> {
        let settings: CredentialSettings = serde_json::from_str(json)?;
        Self::from_settings(settings)
    }
}

/// Serializable credential configuration.
///
/// ```json
/// {
///   "regenerate_on_invalid": false,
///   "digest": { "algorithm": "argon2id", "time_cost": 3 },
///   "salt": "os_random",
///   "validations": {
///     "password": { "rule": "min_trimmed_length", "min": 11 },
///     "username": [{ "rule": "required" }, { "rule": "max_length", "max": 32 }]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSettings {
    pub regenerate_on_invalid: bool,
    pub accept_unset_credential: bool,
    pub digest: DigestAlgorithm,
    pub salt: SaltStrategy,
    pub validations: BTreeMap<String, OneOrMany<RuleSpec>>,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        let options = CredentialOptions::default();
        Self {
            regenerate_on_invalid: options.regenerate_on_invalid,
            accept_unset_credential: options.accept_unset_credential,
            digest: options.digest,
            salt: options.salt,
            validations: BTreeMap::new(),
        }
    }
}
