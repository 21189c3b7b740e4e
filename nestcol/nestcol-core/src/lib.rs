//! Schema model and value types shared by the `nestcol` crates.
//!
//! This crate provides the nested record schema ([`SchemaNode`]), the
//! in-memory record representation ([`Value`]) and the Avro-style JSON form
//! used to load and print schemas.
//!
//! ```rust
//! use nestcol_core::{Field, PrimitiveKind, RecordSchema, SchemaNode};
//!
//! # fn main() -> Result<(), nestcol_core::SchemaError> {
//! let record = RecordSchema::new(
//!     "Person",
//!     vec![
//!         Field::new("name", SchemaNode::Primitive(PrimitiveKind::String)),
//!         Field::new("age", SchemaNode::nullable(PrimitiveKind::Int.into())),
//!     ],
//! )?;
//! let schema = SchemaNode::Record(record);
//! assert_eq!(schema.leaf_paths(), vec!["name", "age"]);
//! # Ok(())
//! # }
//! ```

mod error;
mod schema;
mod value;

pub use error::{SchemaError, ValueTypeError};
pub use schema::{Field, HasSchema, PrimitiveKind, RecordSchema, SchemaNode, format_schema};
pub use value::Value;
