//! Nested record schema model.

mod format;
mod json;
mod types;

pub use format::format_schema;
pub use types::{Field, HasSchema, PrimitiveKind, RecordSchema, SchemaNode};
