mod common;

use common::{init_tracing, new_user, stored};
use credkit_model::{Document, EntitySchema, FieldDef, FieldType, ModelError};
use credkit_user::{
    CredentialOptions, Credentials, HASHED_PASSWORD_FIELD, PASSWORD_FIELD, SALT_FIELD,
    TRANSIENT_PASSWORD_KEY, VIRTUAL_PATHS,
};
use credkit_validation::{Rule, RuleSet, ValidationConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn username_rules() -> RuleSet {
    RuleSet::from(vec![
        Rule::text(|s| s.is_some_and(|s| s.len() >= 3)).with_message("Username too short"),
        Rule::text(|s| s.is_some_and(|s| s.chars().all(char::is_alphanumeric))),
    ])
}

fn credentials_with_username_rules() -> Credentials {
    Credentials::new(
        CredentialOptions::default()
            .with_validations(ValidationConfig::new().with_field("username", username_rules())),
    )
    .unwrap()
}

fn schema_with(credentials: &Credentials) -> Arc<EntitySchema> {
    init_tracing();
    let mut schema = EntitySchema::new("user");
    schema.add_field(FieldDef::text("username", "")).unwrap();
    schema.plugin(credentials).unwrap();
    Arc::new(schema)
}

// ── Installation ────────────────────────────────────────────────

#[test]
fn install_declares_credential_fields() {
    let schema = schema_with(&Credentials::default());

    let hashed = schema.field(HASHED_PASSWORD_FIELD).unwrap();
    assert_eq!(hashed.field_type, FieldType::Text);
    assert_eq!(hashed.default, json!(""));
    let salt = schema.field(SALT_FIELD).unwrap();
    assert_eq!(salt.field_type, FieldType::Text);
    assert_eq!(salt.default, json!(""));

    assert!(schema.is_virtual(PASSWORD_FIELD));
    assert!(schema.field(PASSWORD_FIELD).is_none());
    assert_eq!(schema.virtual_paths().collect::<Vec<_>>(), vec![PASSWORD_FIELD]);
}

#[test]
fn new_document_starts_without_credential() {
    let user = new_user(&Credentials::default());

    assert_eq!(stored(&user, HASHED_PASSWORD_FIELD), "");
    assert_eq!(stored(&user, SALT_FIELD), "");
    assert_eq!(user.get(PASSWORD_FIELD), None);
    assert!(user.is_valid());
}

#[test]
fn password_rules_are_not_path_validators() {
    let schema = schema_with(&credentials_with_username_rules());

    for path in VIRTUAL_PATHS {
        assert!(schema.validators_for(path).is_none(), "{path}");
    }
    assert!(schema.validators_for(HASHED_PASSWORD_FIELD).is_none());
    assert_eq!(schema.validators_for("username").map(RuleSet::len), Some(2));
}

#[test]
fn rules_for_transient_key_are_skipped() {
    let creds = Credentials::new(CredentialOptions::default().with_validations(
        ValidationConfig::new().with_field(TRANSIENT_PASSWORD_KEY, Rule::text(|_| false)),
    ))
    .unwrap();

    let schema = schema_with(&creds);
    assert!(schema.validators_for(TRANSIENT_PASSWORD_KEY).is_none());
}

#[test]
fn rules_for_undeclared_field_fail_install() {
    let creds = Credentials::new(
        CredentialOptions::default()
            .with_validations(ValidationConfig::new().with_field("email", Rule::text(|_| true))),
    )
    .unwrap();
    let mut schema = EntitySchema::new("user");

    let err = schema.plugin(&creds).unwrap_err();
    assert!(matches!(err, ModelError::UnknownPath { ref path } if path == "email"));
}

#[test]
fn installing_twice_is_rejected() {
    let creds = Credentials::default();
    let mut schema = EntitySchema::new("user");
    schema.plugin(&creds).unwrap();

    let err = schema.plugin(&creds).unwrap_err();
    assert!(matches!(err, ModelError::DuplicatePath { .. }));
}

#[test]
fn install_conflicts_with_existing_salt_field() {
    let mut schema = EntitySchema::new("user");
    schema.add_field(FieldDef::number(SALT_FIELD)).unwrap();

    let err = schema.plugin(&Credentials::default()).unwrap_err();
    assert!(matches!(err, ModelError::DuplicatePath { ref path } if path == SALT_FIELD));
}

// ── Writes through the schema ───────────────────────────────────

#[test]
fn custom_field_rules_run_on_write() {
    let creds = credentials_with_username_rules();
    let mut user = Document::new(schema_with(&creds), "user-1");

    user.set("username", "a!").unwrap();

    let messages: Vec<_> = user
        .errors()
        .for_path("username")
        .map(|f| f.message.as_str())
        .collect();
    assert_eq!(messages, vec!["Username too short", "Username is invalid"]);
    assert_eq!(stored(&user, "username"), "a!");
}

#[test]
fn custom_field_rules_leave_password_alone() {
    let creds = credentials_with_username_rules();
    let mut user = Document::new(schema_with(&creds), "user-1");

    user.set("username", "alice").unwrap();
    user.set(PASSWORD_FIELD, "longenoughpw").unwrap();

    assert!(user.is_valid());
    assert!(creds.authenticate(&user, "longenoughpw"));
}

#[test]
fn non_string_password_is_a_type_mismatch() {
    let creds = Credentials::default();
    let mut user = new_user(&creds);

    for value in [json!(12345678901_u64), json!(true), json!(["longenoughpw"])] {
        let err = user.set(PASSWORD_FIELD, value).unwrap_err();
        assert!(matches!(
            err,
            ModelError::TypeMismatch { ref path, expected: FieldType::Text } if path == PASSWORD_FIELD
        ));
    }
    assert_eq!(stored(&user, HASHED_PASSWORD_FIELD), "");
    assert!(user.is_valid());
}

#[test]
fn schema_is_shared_between_documents() {
    let creds = Credentials::default();
    let schema = schema_with(&creds);
    let mut alice = Document::new(schema.clone(), "alice");
    let mut bob = Document::new(schema, "bob");

    alice.set(PASSWORD_FIELD, "alice-password").unwrap();
    bob.set(PASSWORD_FIELD, "bob-password").unwrap();

    assert!(creds.authenticate(&alice, "alice-password"));
    assert!(!creds.authenticate(&alice, "bob-password"));
    assert!(creds.authenticate(&bob, "bob-password"));
    assert_eq!(alice.get(PASSWORD_FIELD), Some(json!("alice-password")));
}
