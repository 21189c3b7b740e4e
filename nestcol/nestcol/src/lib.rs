//! Nested records over flat columns.
//!
//! This crate bundles the `nestcol` building blocks:
//! - [`core`]: the schema model and record values;
//! - [`projection`]: pruning a schema down to selected leaf paths;
//! - [`column`]: the column tree, its levels, and record shredding/assembly;
//! - [`arrow`]: Arrow schema conversion.
//!
//! [`ColumnSession`] ties them together for the common case of reading or
//! writing records against one (optionally projected) schema.
//!
//! ```rust
//! use nestcol::{
//!     ColumnSession,
//!     column::MemColumnStore,
//!     core::{Field, PrimitiveKind, RecordSchema, SchemaNode, Value},
//! };
//!
//! # fn main() -> Result<(), nestcol::NestcolError> {
//! let schema: SchemaNode = RecordSchema::new(
//!     "Rec",
//!     vec![
//!         Field::new("id", PrimitiveKind::Long.into()),
//!         Field::new("tags", SchemaNode::array(PrimitiveKind::String.into())),
//!     ],
//! )?
//! .into();
//!
//! let store = MemColumnStore::new();
//! let full = ColumnSession::new(&schema)?;
//! full.writer(&store)?
//!     .write(&Value::Record(vec![Value::Long(7), Value::Array(vec![Value::string("x")])]))?;
//!
//! let ids = ColumnSession::projected(&schema, ["id"])?;
//! assert_eq!(ids.reader(&store)?.read()?, Some(Value::Record(vec![Value::Long(7)])));
//! # Ok(())
//! # }
//! ```
mod error;
mod session;

pub use error::NestcolError;
pub use nestcol_arrow as arrow;
pub use nestcol_column as column;
pub use nestcol_core as core;
pub use nestcol_projection as projection;
pub use session::ColumnSession;
