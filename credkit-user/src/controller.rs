use crate::error::CredentialResult;
use crate::options::CredentialOptions;
use crate::plugin::{HASHED_PASSWORD_FIELD, PASSWORD_FIELD, SALT_FIELD, TRANSIENT_PASSWORD_KEY};
use credkit_model::Entity;
use credkit_validation::{ValidationConfig, ValidationFailure, validate};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// The outcome of running a new password through validation, salt
/// generation and digest, before anything is written to the document.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordChange {
    pub failures: Vec<ValidationFailure>,
    pub salt: String,
    pub hashed_password: String,
}

impl PasswordChange {
    /// True when no validation rule rejected the password.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Password credential controller.
///
/// Holds the merged validation configuration and the digest policy. Cheap to
/// clone; every clone shares the same read-only configuration, so one value
/// can serve every document built from a schema.
#[derive(Debug, Clone)]
pub struct Credentials {
    options: Arc<CredentialOptions>,
}

impl Credentials {
    /// Validates `options` and merges its rules over the built-in defaults.
    pub fn new(options: CredentialOptions) -> CredentialResult<Self> {
        options.digest.validate()?;
        Ok(Self::from_checked(options))
    }

    fn from_checked(mut options: CredentialOptions) -> Self {
        options.validations = std::mem::take(&mut options.validations).merged_over_defaults();
        Self {
            options: Arc::new(options),
        }
    }

    /// The effective options, with defaults merged into `validations`.
    pub fn options(&self) -> &CredentialOptions {
        &self.options
    }

    pub fn validations(&self) -> &ValidationConfig {
        &self.options.validations
    }

    /// A fresh salt from the configured strategy.
    pub fn make_salt(&self) -> String {
        self.options.salt.make_salt()
    }

    /// Digests `plaintext` with the salt currently stored on `entity`.
    pub fn encrypt_password(
        &self,
        entity: impl AsRef<Entity>,
        plaintext: Option<&str>,
    ) -> CredentialResult<String> {
        let salt = entity.as_ref().field_str(SALT_FIELD);
        Ok(self.options.digest.digest(plaintext, salt)?)
    }

    /// Computes what assigning `plaintext` would do, without touching the
    /// entity: the validation failures, a new salt and the digest under it.
    pub fn apply_password_change(
        &self,
        entity: &Entity,
        plaintext: Option<&str>,
    ) -> CredentialResult<PasswordChange> {
        let candidate = plaintext.map_or(Value::Null, |p| Value::String(p.to_owned()));
        let failures = match self.options.validations.get(PASSWORD_FIELD) {
            Some(rules) => validate(PASSWORD_FIELD, &candidate, rules),
            None => Vec::new(),
        };

        let salt = self.make_salt();
        let hashed_password = self.options.digest.digest(plaintext, &salt)?;
        debug!(
            entity_id = %entity.id,
            salt_strategy = ?self.options.salt,
            failures = failures.len(),
            "Password change computed"
        );

        Ok(PasswordChange {
            failures,
            salt,
            hashed_password,
        })
    }

    /// Assigns a new password to `entity`.
    ///
    /// Validation failures are recorded on the entity and never abort the
    /// call. Unless `regenerate_on_invalid` is off and a rule failed, the
    /// plaintext is kept in memory and `salt` / `hashed_password` are
    /// replaced. Returns whether the credential was replaced.
    pub fn set_password(
        &self,
        entity: &mut Entity,
        plaintext: Option<&str>,
    ) -> CredentialResult<bool> {
        let change = self.apply_password_change(entity, plaintext)?;
        let rejected = !change.is_valid();

        if rejected {
            warn!(
                entity_id = %entity.id,
                failures = change.failures.len(),
                "Password failed validation"
            );
        }
        for failure in change.failures {
            entity.invalidate(&failure.path, failure.message, failure.value);
        }

        if rejected && !self.options.regenerate_on_invalid {
            debug!(entity_id = %entity.id, "Keeping previous credential");
            return Ok(false);
        }

        entity.set_transient(TRANSIENT_PASSWORD_KEY, plaintext);
        entity.set_field(SALT_FIELD, Value::String(change.salt));
        entity.set_field(HASHED_PASSWORD_FIELD, Value::String(change.hashed_password));
        debug!(entity_id = %entity.id, "Credential updated");
        Ok(true)
    }

    /// The plaintext assigned during this in-memory lifetime, if any.
    pub fn password<'a>(&self, entity: &'a Entity) -> Option<&'a str> {
        entity.transient(TRANSIENT_PASSWORD_KEY)
    }

    /// Whether `entity` holds a digest.
    pub fn has_credential(&self, entity: impl AsRef<Entity>) -> bool {
        !entity.as_ref().field_str(HASHED_PASSWORD_FIELD).is_empty()
    }

    /// Checks `candidate` against the stored digest.
    ///
    /// A record without a digest only matches the empty guess, and only
    /// when `accept_unset_credential` is on. Digest failures count as a
    /// mismatch.
    pub fn authenticate(&self, entity: impl AsRef<Entity>, candidate: &str) -> bool {
        let entity = entity.as_ref();
        let stored = entity.field_str(HASHED_PASSWORD_FIELD);
        if stored.is_empty() && !self.options.accept_unset_credential {
            return false;
        }

        let salt = entity.field_str(SALT_FIELD);
        match self.options.digest.verify(Some(candidate), salt, stored) {
            Ok(matched) => matched,
            Err(e) => {
                warn!(entity_id = %entity.id, error = %e, "Digest failed during authentication");
                false
            }
        }
    }
}

impl Default for Credentials {
    /// Built-in password rule, HMAC-SHA1 digests, OS-random salts.
    fn default() -> Self {
        Self::from_checked(CredentialOptions::default())
    }
}
