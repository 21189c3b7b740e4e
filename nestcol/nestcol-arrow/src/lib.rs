//! Arrow integration layer for `nestcol`.
//!
//! Converts a (typically projected) record [`SchemaNode`](nestcol_core::SchemaNode)
//! into an Arrow [`Schema`](arrow::datatypes::Schema):
//! - records become `Struct` fields, the root record becomes the schema;
//! - arrays become `List` with an `item` child;
//! - maps become `Map` with a `Utf8` key;
//! - a `[null, T]` union becomes a nullable field of `T`.
//!
//! ```rust
//! use arrow::datatypes::DataType;
//! use nestcol_arrow::schema_to_arrow;
//! use nestcol_core::{Field, PrimitiveKind, RecordSchema, SchemaNode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema: SchemaNode = RecordSchema::new(
//!     "Rec",
//!     vec![Field::new("name", SchemaNode::nullable(PrimitiveKind::String.into()))],
//! )?
//! .into();
//! let arrow_schema = schema_to_arrow(&schema)?;
//! let name = arrow_schema.field_with_name("name")?;
//! assert_eq!(name.data_type(), &DataType::Utf8);
//! assert!(name.is_nullable());
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod schema_convert;

/// Re-export of [`error::ArrowConvertError`].
pub use error::ArrowConvertError;
/// Re-exports from [`schema_convert`].
pub use schema_convert::{primitive_to_datatype, schema_to_arrow};
