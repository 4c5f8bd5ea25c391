//! Document model for credkit.
//!
//! Defines the host-side types that credential plugins attach to:
//! - [`Entity`] — the stored record (id, type, JSON payload, timestamps) plus
//!   in-memory transient values and recorded validation failures
//! - [`EntitySchema`] — declares persisted fields, virtual fields and path validators
//! - [`Document`] — an entity bound to its schema; routes reads and writes
//! - [`VirtualField`] / [`SchemaPlugin`] — the hooks plugins implement
//!
//! Persistence is out of scope: the serialized [`Entity`] is the stored form,
//! and anything held only in memory is skipped when serializing.

mod document;
mod entity;
mod error;
mod hooks;
mod schema;

pub use document::Document;
pub use entity::Entity;
pub use error::{ModelError, ModelResult};
pub use hooks::{SchemaPlugin, VirtualField};
pub use schema::{EntitySchema, FieldDef, FieldType};
