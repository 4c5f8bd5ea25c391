use crate::error::{ModelError, ModelResult};
use crate::hooks::{SchemaPlugin, VirtualField};
use credkit_validation::RuleSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Describes an entity type: its persisted fields, its virtual fields and
/// the validators attached to persisted paths.
///
/// Schemas are assembled once and then shared behind an `Arc` by every
/// document of that type.
pub struct EntitySchema {
    pub entity_type: String,
    fields: Vec<FieldDef>,
    virtuals: BTreeMap<String, Arc<dyn VirtualField>>,
    validators: BTreeMap<String, RuleSet>,
}

impl EntitySchema {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: Vec::new(),
            virtuals: BTreeMap::new(),
            validators: BTreeMap::new(),
        }
    }

    /// Declares a persisted field.
    pub fn add_field(&mut self, field: FieldDef) -> ModelResult<()> {
        if self.is_declared(&field.path) {
            return Err(ModelError::DuplicatePath { path: field.path });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Builder form of [`EntitySchema::add_field`].
    pub fn with_field(mut self, field: FieldDef) -> ModelResult<Self> {
        self.add_field(field)?;
        Ok(self)
    }

    /// Declares a virtual field handled by `hook`.
    pub fn add_virtual(
        &mut self,
        path: impl Into<String>,
        hook: Arc<dyn VirtualField>,
    ) -> ModelResult<()> {
        let path = path.into();
        if self.is_declared(&path) {
            return Err(ModelError::DuplicatePath { path });
        }
        self.virtuals.insert(path, hook);
        Ok(())
    }

    /// Attaches rules to a persisted path. Rules added to the same path
    /// accumulate in registration order.
    pub fn add_path_validator(&mut self, path: &str, rules: RuleSet) -> ModelResult<()> {
        if self.is_virtual(path) {
            return Err(ModelError::VirtualPath {
                path: path.to_string(),
            });
        }
        if self.field(path).is_none() {
            return Err(ModelError::UnknownPath {
                path: path.to_string(),
            });
        }
        self.validators
            .entry(path.to_string())
            .or_default()
            .extend(rules);
        Ok(())
    }

    /// Runs a plugin against this schema.
    pub fn plugin(&mut self, plugin: &dyn SchemaPlugin) -> ModelResult<()> {
        plugin.install(self)
    }

    pub fn field(&self, path: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.path == path)
    }

    /// Persisted fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn is_virtual(&self, path: &str) -> bool {
        self.virtuals.contains_key(path)
    }

    pub fn virtual_field(&self, path: &str) -> Option<&Arc<dyn VirtualField>> {
        self.virtuals.get(path)
    }

    /// Names of the virtual fields, sorted.
    pub fn virtual_paths(&self) -> impl Iterator<Item = &str> {
        self.virtuals.keys().map(String::as_str)
    }

    pub fn validators_for(&self, path: &str) -> Option<&RuleSet> {
        self.validators.get(path)
    }

    fn is_declared(&self, path: &str) -> bool {
        self.field(path).is_some() || self.is_virtual(path)
    }
}

impl fmt::Debug for EntitySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySchema")
            .field("entity_type", &self.entity_type)
            .field("fields", &self.fields)
            .field("virtuals", &self.virtuals.keys().collect::<Vec<_>>())
            .field("validators", &self.validators)
            .finish()
    }
}

/// A persisted field: its top-level path, type and default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub path: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub default: Value,
}

impl FieldDef {
    fn simple(path: &str, field_type: FieldType, default: Value) -> Self {
        Self {
            path: path.into(),
            field_type,
            default,
        }
    }

    /// Shorthand for a string field.
    pub fn text(path: &str, default: &str) -> Self {
        Self::simple(path, FieldType::Text, Value::String(default.into()))
    }

    /// Shorthand for a numeric field without a default.
    pub fn number(path: &str) -> Self {
        Self::simple(path, FieldType::Number, Value::Null)
    }

    /// Shorthand for a boolean field.
    pub fn bool(path: &str, default: bool) -> Self {
        Self::simple(path, FieldType::Bool, Value::Bool(default))
    }

    /// Shorthand for a free-form JSON field.
    pub fn json(path: &str) -> Self {
        Self::simple(path, FieldType::Json, Value::Null)
    }
}

/// The type of a persisted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Bool,
    Json,
}

impl FieldType {
    /// Whether `value` may be stored in a field of this type. Null is
    /// accepted everywhere and clears the field.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            _ if value.is_null() => true,
            FieldType::Text => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Json => true,
        }
    }
}
