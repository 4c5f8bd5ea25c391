use crate::entity::Entity;
use crate::error::{ModelError, ModelResult};
use crate::schema::EntitySchema;
use credkit_validation::{ValidationErrors, validate};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// An [`Entity`] bound to the schema that describes it.
///
/// All reads and writes go through the schema: virtual paths are routed to
/// their hooks, persisted paths are type-checked and validated before they
/// are written.
#[derive(Debug, Clone)]
pub struct Document {
    schema: Arc<EntitySchema>,
    entity: Entity,
}

impl Document {
    /// Creates a fresh document with every declared field at its default.
    pub fn new(schema: Arc<EntitySchema>, id: impl Into<String>) -> Self {
        let data: Map<String, Value> = schema
            .fields()
            .iter()
            .map(|f| (f.path.clone(), f.default.clone()))
            .collect();
        let entity = Entity::new(id, schema.entity_type.clone(), Value::Object(data));
        Self { schema, entity }
    }

    /// Rehydrates a stored entity. Declared fields missing from the stored
    /// payload are filled with their defaults; transient state starts empty.
    pub fn load(schema: Arc<EntitySchema>, mut entity: Entity) -> Self {
        if !entity.data.is_object() {
            entity.data = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut entity.data {
            for field in schema.fields() {
                map.entry(field.path.clone())
                    .or_insert_with(|| field.default.clone());
            }
        }
        debug!(entity_id = %entity.id, entity_type = %entity.entity_type, "Document loaded");
        Self { schema, entity }
    }

    /// Parses the stored JSON form and loads it.
    pub fn from_json(schema: Arc<EntitySchema>, json: &str) -> ModelResult<Self> {
        let entity: Entity = serde_json::from_str(json)?;
        Ok(Self::load(schema, entity))
    }

    /// The stored JSON form. Transient values are never included.
    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(&self.entity)?)
    }

    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn schema(&self) -> &Arc<EntitySchema> {
        &self.schema
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }

    /// Reads a path: virtual fields through their hook, persisted fields
    /// from the payload.
    pub fn get(&self, path: &str) -> Option<Value> {
        match self.schema.virtual_field(path) {
            Some(hook) => hook.get(&self.entity),
            None => self.entity.field(path).cloned(),
        }
    }

    /// Writes a path.
    ///
    /// Virtual paths hand the value to their hook. Persisted paths must be
    /// declared and type-compatible; their validators run first and any
    /// failures are recorded on the document, but the value is written
    /// either way.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> ModelResult<()> {
        let value = value.into();

        if let Some(hook) = self.schema.virtual_field(path) {
            let hook = Arc::clone(hook);
            return hook.set(&mut self.entity, value);
        }

        let field = self
            .schema
            .field(path)
            .ok_or_else(|| ModelError::UnknownPath {
                path: path.to_string(),
            })?;
        if !field.field_type.accepts(&value) {
            return Err(ModelError::TypeMismatch {
                path: path.to_string(),
                expected: field.field_type,
            });
        }

        if let Some(rules) = self.schema.validators_for(path) {
            let failures = validate(path, &value, rules);
            if !failures.is_empty() {
                warn!(
                    entity_id = %self.entity.id,
                    path,
                    failures = failures.len(),
                    "Field failed validation"
                );
            }
            for failure in failures {
                self.entity.invalidate(&failure.path, failure.message, failure.value);
            }
        }

        self.entity.set_field(path, value);
        Ok(())
    }

    /// Records a validation failure without interrupting the caller.
    pub fn invalidate(&mut self, path: &str, message: impl Into<String>, value: Value) {
        self.entity.invalidate(path, message, value);
    }

    pub fn errors(&self) -> &ValidationErrors {
        self.entity.errors()
    }

    pub fn is_valid(&self) -> bool {
        self.entity.is_valid()
    }

    /// Checks the document before it is persisted: `Err(Invalid)` carrying
    /// every recorded failure, or `Ok(())`.
    pub fn validate(&self) -> ModelResult<()> {
        if self.entity.is_valid() {
            Ok(())
        } else {
            Err(ModelError::Invalid(self.entity.errors().clone()))
        }
    }
}

impl AsRef<Entity> for Document {
    fn as_ref(&self) -> &Entity {
        &self.entity
    }
}

impl AsRef<Entity> for Entity {
    fn as_ref(&self) -> &Entity {
        self
    }
}
