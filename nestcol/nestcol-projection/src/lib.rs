//! Schema projection for `nestcol`.
//!
//! A projection keeps only the requested leaf fields of a nested record
//! schema, together with the records, arrays, maps and nullable unions needed
//! to reach them. Fields keep their relative declaration order.
//!
//! ```rust
//! use nestcol_core::{Field, PrimitiveKind, RecordSchema, SchemaNode};
//! use nestcol_projection::project_schema;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema: SchemaNode = RecordSchema::new(
//!     "Rec",
//!     vec![
//!         Field::new("str_field", PrimitiveKind::String.into()),
//!         Field::new("int_field", PrimitiveKind::Int.into()),
//!         Field::new("long_field", PrimitiveKind::Long.into()),
//!     ],
//! )?
//! .into();
//!
//! let projected = project_schema(&schema, ["int_field", "str_field"])?;
//! assert_eq!(projected.leaf_paths(), vec!["str_field", "int_field"]);
//! # Ok(())
//! # }
//! ```

mod error;
mod path_tree;
mod project;

pub use error::ProjectionError;
pub use path_tree::PathTree;
pub use project::{project_schema, project_type};
