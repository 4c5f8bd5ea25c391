use credkit_validation::{ValidationErrors, ValidationFailure};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use zeroize::Zeroizing;

/// A stored record.
///
/// `data` holds the persisted fields as a JSON object. Transient values and
/// validation failures live only in memory: they are skipped when the entity
/// is serialized and are empty after it is read back.
#[derive(Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub entity_type: String,
    pub data: Value,
    pub created_at: i64,
    pub modified_at: i64,
    #[serde(skip)]
    transient: BTreeMap<String, Zeroizing<String>>,
    #[serde(skip)]
    errors: ValidationErrors,
}

impl Entity {
    /// Creates an entity with the given payload, stamped with the current time.
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>, data: Value) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            data,
            created_at: now,
            modified_at: now,
            transient: BTreeMap::new(),
            errors: ValidationErrors::new(),
        }
    }

    /// Top-level persisted field.
    pub fn field(&self, path: &str) -> Option<&Value> {
        self.data.get(path)
    }

    /// Top-level persisted string field, `""` when missing or not a string.
    pub fn field_str(&self, path: &str) -> &str {
        self.field(path).and_then(Value::as_str).unwrap_or_default()
    }

    /// Writes a top-level persisted field without type checks or validation
    /// and bumps `modified_at`. Non-object payloads are replaced by an object.
    pub fn set_field(&mut self, path: &str, value: Value) {
        if !self.data.is_object() {
            self.data = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.data {
            map.insert(path.to_string(), value);
        }
        self.touch();
    }

    /// Sets `modified_at` to the current time.
    pub fn touch(&mut self) {
        self.modified_at = chrono::Utc::now().timestamp_millis();
    }

    /// In-memory value stored under `key`, if any.
    pub fn transient(&self, key: &str) -> Option<&str> {
        self.transient.get(key).map(|v| v.as_str())
    }

    /// Replaces (or with `None`, removes) an in-memory value. The previous
    /// buffer is zeroed when dropped.
    pub fn set_transient(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.transient
                    .insert(key.to_string(), Zeroizing::new(v.to_string()));
            }
            None => {
                self.transient.remove(key);
            }
        }
    }

    /// Records a validation failure for `path`. Never interrupts the caller.
    pub fn invalidate(&mut self, path: &str, message: impl Into<String>, value: Value) {
        self.errors.push(ValidationFailure::new(path, message, value));
    }

    /// Failures recorded since the entity was created or loaded.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Forgets every recorded failure.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("entity_type", &self.entity_type)
            .field("data", &self.data)
            .field("created_at", &self.created_at)
            .field("modified_at", &self.modified_at)
            .field("transient", &self.transient.keys().collect::<Vec<_>>())
            .field("errors", &self.errors.len())
            .finish()
    }
}
