use crate::controller::Credentials;
use credkit_model::{
    Entity, EntitySchema, FieldDef, FieldType, ModelError, ModelResult, SchemaPlugin,
    VirtualField,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Virtual field through which passwords are set and read.
pub const PASSWORD_FIELD: &str = credkit_validation::PASSWORD_FIELD;

/// Persisted digest of the current password.
pub const HASHED_PASSWORD_FIELD: &str = "hashed_password";

/// Persisted salt the digest was computed with.
pub const SALT_FIELD: &str = "salt";

/// In-memory key holding the last assigned plaintext.
pub const TRANSIENT_PASSWORD_KEY: &str = "_password";

/// Paths that exist only in memory. Their rules are run by the password
/// setter, never registered as schema path validators.
pub const VIRTUAL_PATHS: [&str; 2] = [PASSWORD_FIELD, TRANSIENT_PASSWORD_KEY];

/// The `password` virtual field.
///
/// Accepts a string or null (clears the credential); any other JSON type is
/// a type mismatch.
#[derive(Debug, Clone)]
pub struct PasswordField {
    credentials: Credentials,
}

impl PasswordField {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl VirtualField for PasswordField {
    fn set(&self, entity: &mut Entity, value: Value) -> ModelResult<()> {
        let plaintext = match &value {
            Value::Null => None,
            Value::String(s) => Some(s.as_str()),
            _ => {
                return Err(ModelError::TypeMismatch {
                    path: PASSWORD_FIELD.to_string(),
                    expected: FieldType::Text,
                });
            }
        };
        self.credentials
            .set_password(entity, plaintext)
            .map(|_| ())
            .map_err(|e| ModelError::Hook {
                path: PASSWORD_FIELD.to_string(),
                reason: e.to_string(),
            })
    }

    fn get(&self, entity: &Entity) -> Option<Value> {
        self.credentials
            .password(entity)
            .map(|p| Value::String(p.to_owned()))
    }
}

impl SchemaPlugin for Credentials {
    /// Declares the credential fields and the `password` virtual, then
    /// registers rules for every configured persisted path.
    ///
    /// Fields with configured rules must already be declared on the schema.
    fn install(&self, schema: &mut EntitySchema) -> ModelResult<()> {
        schema.add_field(FieldDef::text(HASHED_PASSWORD_FIELD, ""))?;
        schema.add_field(FieldDef::text(SALT_FIELD, ""))?;
        schema.add_virtual(PASSWORD_FIELD, Arc::new(PasswordField::new(self.clone())))?;

        for (field, rules) in self.validations().iter() {
            if VIRTUAL_PATHS.contains(&field) {
                continue;
            }
            schema.add_path_validator(field, rules.clone())?;
        }

        info!(
            entity_type = %schema.entity_type,
            validated_fields = self.validations().len(),
            "Credential fields installed"
        );
        Ok(())
    }
}
