//! Error types for the column-I/O tree and record shredding.

use nestcol_core::{SchemaNode, ValueTypeError};

/// Errors produced while building a [`ColumnIo`](crate::ColumnIo) or moving
/// records in and out of a [`ColumnStore`](crate::ColumnStore).
#[derive(Debug, thiserror::Error)]
pub enum ColumnError {
    /// Column trees are built from a record schema.
    #[error("column tree requires a record root, got {}", .schema.type_name())]
    NonRecordRoot { schema: Box<SchemaNode> },

    /// A union that is not a two-branch nullable union.
    #[error("unsupported schema shape at '{path}': {reason}")]
    UnsupportedSchemaShape {
        path: String,
        reason: &'static str,
        schema: Box<SchemaNode>,
    },

    /// First/last resolution asked for a depth the column does not have.
    #[error("repetition depth {depth} is out of range for column '{path}' (max {max})")]
    InvalidRepetitionDepth { path: String, depth: u32, max: u32 },

    /// A leaf-only operation was applied to a group node.
    #[error("node '{path}' is not a leaf column")]
    NotALeaf { path: String },

    /// The store has no column for the requested descriptor.
    #[error("column {column} not found in store")]
    MissingColumn { column: String },

    /// A value's primitive kind differs from its column's.
    #[error("value type mismatch in column '{path}': {source}")]
    ValueTypeMismatch {
        path: String,
        #[source]
        source: ValueTypeError,
    },

    /// Levels outside the range allowed by the column descriptor.
    #[error("invalid levels r:{repetition_level} d:{definition_level} for column {column}")]
    InvalidLevels {
        column: String,
        repetition_level: u32,
        definition_level: u32,
    },

    /// A value does not have the shape its schema node requires.
    #[error("value shape mismatch at '{path}': expected {expected}, got {actual}")]
    ValueShapeMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// `Null` was given for a node that is not nullable.
    #[error("null value for required field '{path}'")]
    NullForRequired { path: String },

    /// The value cannot be represented by the column tree.
    #[error("unsupported value at '{path}': {reason}")]
    UnsupportedValue { path: String, reason: &'static str },

    /// A column's triplets do not line up with the tree's levels.
    #[error("corrupt column '{path}': {detail}")]
    CorruptColumn { path: String, detail: String },

    /// A column append failed part way through a record.
    #[error("record writer is unusable after a failed column append")]
    WriterPoisoned,
}
