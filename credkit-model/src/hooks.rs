use crate::entity::Entity;
use crate::error::ModelResult;
use crate::schema::EntitySchema;
use serde_json::Value;

/// A field that is intercepted on read and write but never stored as-is.
///
/// The setter may record validation failures on the entity
/// ([`Entity::invalidate`]) and write persisted fields as a side effect;
/// it returns `Err` only when it cannot run at all.
pub trait VirtualField: Send + Sync {
    /// Handles an assignment to the virtual path.
    fn set(&self, entity: &mut Entity, value: Value) -> ModelResult<()>;

    /// Reads the virtual path. Defaults to absent.
    fn get(&self, entity: &Entity) -> Option<Value> {
        let _ = entity;
        None
    }
}

/// Reusable schema extension: declares fields, virtuals and validators on
/// a schema in one step.
pub trait SchemaPlugin {
    fn install(&self, schema: &mut EntitySchema) -> ModelResult<()>;
}
