//! Column-I/O tree for `nestcol`.
//!
//! [`ColumnIo`] maps a nested record schema onto flat primitive columns. Every
//! leaf carries the repetition and definition levels a reader needs to place
//! its values back into the nested structure, and the tree answers which
//! column opens a new repeated group at a given depth.
//!
//! Values themselves live in a [`ColumnStore`]. [`RecordWriter`] shreds
//! [`Value`](nestcol_core::Value) records into a store and [`RecordReader`]
//! assembles them back. [`MemColumnStore`] is an in-memory store.
//!
//! ```rust
//! use nestcol_column::{ColumnIo, MemColumnStore, RecordReader, RecordWriter};
//! use nestcol_core::{Field, PrimitiveKind, RecordSchema, SchemaNode, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let item = RecordSchema::new(
//!     "Item",
//!     vec![
//!         Field::new("a", PrimitiveKind::Int.into()),
//!         Field::new("b", PrimitiveKind::Int.into()),
//!     ],
//! )?;
//! let schema: SchemaNode =
//!     RecordSchema::new("Rec", vec![Field::new("items", SchemaNode::array(item.into()))])?.into();
//!
//! let io = ColumnIo::build(&schema)?;
//! let a = io.leaves().next().unwrap().id();
//! assert_eq!(io.node(a).repetition_level(), 1);
//! assert!(io.is_first(a, 1)?);
//!
//! let store = MemColumnStore::new();
//! let record = Value::Record(vec![Value::Array(vec![
//!     Value::Record(vec![Value::Int(1), Value::Int(2)]),
//! ])]);
//! RecordWriter::new(&io, &store)?.write(&record)?;
//! assert_eq!(RecordReader::new(&io, &store)?.read()?, Some(record));
//! # Ok(())
//! # }
//! ```

mod descriptor;
mod error;
mod io;
mod mem_store;
mod reader;
mod store;
mod writer;

pub use descriptor::ColumnDescriptor;
pub use error::ColumnError;
pub use io::{ColumnIo, ColumnNode, GroupShape, NodeId, NodeKind};
pub use mem_store::{MemColumnReader, MemColumnStore, MemColumnWriter};
pub use reader::RecordReader;
pub use store::{ColumnReader, ColumnStore, ColumnWriter, Triplet};
pub use writer::RecordWriter;
