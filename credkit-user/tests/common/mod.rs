//! Shared test helpers for credential tests.

#![allow(dead_code)]

use credkit_model::{Document, EntitySchema, FieldDef};
use credkit_user::Credentials;
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once per test binary. Filter with
/// `RUST_LOG=credkit_user=debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A `user` schema with a `username` field and the credential plugin.
pub fn user_schema(credentials: &Credentials) -> Arc<EntitySchema> {
    init_tracing();
    let mut schema = EntitySchema::new("user");
    schema.add_field(FieldDef::text("username", "")).unwrap();
    schema.plugin(credentials).unwrap();
    Arc::new(schema)
}

/// A fresh user document backed by [`user_schema`].
pub fn new_user(credentials: &Credentials) -> Document {
    Document::new(user_schema(credentials), "user-1")
}

/// Persisted string field, `""` when missing.
pub fn stored(doc: &Document, path: &str) -> String {
    doc.entity().field_str(path).to_string()
}
