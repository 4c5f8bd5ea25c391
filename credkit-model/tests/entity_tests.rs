use credkit_model::Entity;
use serde_json::json;

fn make_entity(data: serde_json::Value) -> Entity {
    let mut entity = Entity::new("user-1", "user", data);
    entity.created_at = 1000;
    entity.modified_at = 2000;
    entity
}

// ── Construction & fields ────────────────────────────────────────

#[test]
fn entity_fields_accessible() {
    let e = make_entity(json!({"username": "alice"}));
    assert_eq!(e.id, "user-1");
    assert_eq!(e.entity_type, "user");
    assert_eq!(e.created_at, 1000);
    assert_eq!(e.modified_at, 2000);
}

#[test]
fn new_entity_is_stamped_with_current_time() {
    let before = chrono::Utc::now().timestamp_millis();
    let e = Entity::new("x", "user", json!({}));
    assert!(e.created_at >= before);
    assert_eq!(e.created_at, e.modified_at);
}

#[test]
fn new_entity_is_valid_with_no_transient_values() {
    let e = make_entity(json!({}));
    assert!(e.is_valid());
    assert_eq!(e.transient("_password"), None);
}

// ── Top-level fields ─────────────────────────────────────────────

#[test]
fn field_str_defaults_to_empty() {
    let e = make_entity(json!({"salt": "s", "logins": 3}));
    assert_eq!(e.field_str("salt"), "s");
    assert_eq!(e.field_str("logins"), "");
    assert_eq!(e.field_str("missing"), "");
}

#[test]
fn set_field_writes_and_touches() {
    let mut e = make_entity(json!({}));
    e.set_field("salt", json!("abc"));
    assert_eq!(e.field("salt"), Some(&json!("abc")));
    assert!(e.modified_at > 2000);
}

#[test]
fn set_field_replaces_non_object_payload() {
    let mut e = make_entity(json!(null));
    e.set_field("salt", json!("abc"));
    assert_eq!(e.data, json!({"salt": "abc"}));
}

// ── Transient values ─────────────────────────────────────────────

#[test]
fn transient_values_set_overwrite_and_clear() {
    let mut e = make_entity(json!({}));
    e.set_transient("_password", Some("first"));
    assert_eq!(e.transient("_password"), Some("first"));

    e.set_transient("_password", Some("second"));
    assert_eq!(e.transient("_password"), Some("second"));

    e.set_transient("_password", None);
    assert_eq!(e.transient("_password"), None);
}

#[test]
fn transient_values_are_not_serialized() {
    let mut e = make_entity(json!({"salt": "s"}));
    e.set_transient("_password", Some("plaintext-secret"));

    let json_str = serde_json::to_string(&e).unwrap();
    assert!(!json_str.contains("plaintext-secret"));

    let parsed: Entity = serde_json::from_str(&json_str).unwrap();
    assert_eq!(parsed.transient("_password"), None);
}

#[test]
fn debug_output_hides_transient_values() {
    let mut e = make_entity(json!({}));
    e.set_transient("_password", Some("plaintext-secret"));
    let debug = format!("{e:?}");
    assert!(debug.contains("_password"));
    assert!(!debug.contains("plaintext-secret"));
}

// ── Validation failures ──────────────────────────────────────────

#[test]
fn invalidate_records_failures_in_order() {
    let mut e = make_entity(json!({}));
    e.invalidate("password", "too short", json!("abc"));
    e.invalidate("username", "taken", json!("bob"));

    assert!(!e.is_valid());
    let paths: Vec<&str> = e.errors().iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["password", "username"]);

    e.clear_errors();
    assert!(e.is_valid());
}

#[test]
fn failures_are_not_serialized() {
    let mut e = make_entity(json!({}));
    e.invalidate("password", "too short", json!("abc"));
    let parsed: Entity = serde_json::from_str(&serde_json::to_string(&e).unwrap()).unwrap();
    assert!(parsed.is_valid());
}

// ── Serialization roundtrip ──────────────────────────────────────

#[test]
fn deserialize_from_known_json() {
    let json_str = r#"{
        "id": "abc",
        "entity_type": "user",
        "data": {"hashed_password": "", "salt": ""},
        "created_at": 100,
        "modified_at": 200
    }"#;
    let e: Entity = serde_json::from_str(json_str).unwrap();
    assert_eq!(e.id, "abc");
    assert_eq!(e.field("salt"), Some(&json!("")));
    assert_eq!(e.modified_at, 200);
}

#[test]
fn entity_clone_is_independent() {
    let e = make_entity(json!({"username": "original"}));
    let mut cloned = e.clone();
    cloned.data["username"] = json!("modified");

    assert_eq!(e.field_str("username"), "original");
    assert_eq!(cloned.field_str("username"), "modified");
}
