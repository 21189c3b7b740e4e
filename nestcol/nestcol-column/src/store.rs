//! Interface to the physical column store.
//!
//! The column tree never holds values; it asks a [`ColumnStore`] for one
//! writer or reader per leaf, keyed by the leaf's [`ColumnDescriptor`].

use nestcol_core::Value;

use crate::{descriptor::ColumnDescriptor, error::ColumnError};

/// One stored entry of a column: a value (or `None` for a null) tagged with
/// its levels.
#[derive(Debug, Clone, PartialEq)]
pub struct Triplet {
    pub repetition_level: u32,
    pub definition_level: u32,
    pub value: Option<Value>,
}

impl Triplet {
    pub fn value(value: Value, repetition_level: u32, definition_level: u32) -> Self {
        Self {
            repetition_level,
            definition_level,
            value: Some(value),
        }
    }

    pub fn null(repetition_level: u32, definition_level: u32) -> Self {
        Self {
            repetition_level,
            definition_level,
            value: None,
        }
    }
}

/// Append side of one column.
pub trait ColumnWriter {
    fn descriptor(&self) -> &ColumnDescriptor;

    /// Append a defined value. Fails with [`ColumnError::ValueTypeMismatch`]
    /// when `value` is not of the column's primitive kind.
    fn write(
        &mut self,
        value: Value,
        repetition_level: u32,
        definition_level: u32,
    ) -> Result<(), ColumnError>;

    /// Append a null defined up to `definition_level`.
    fn write_null(
        &mut self,
        repetition_level: u32,
        definition_level: u32,
    ) -> Result<(), ColumnError>;
}

/// Cursor over one column.
pub trait ColumnReader {
    fn descriptor(&self) -> &ColumnDescriptor;

    /// The entry under the cursor, `None` once the column is exhausted.
    fn current(&self) -> Option<&Triplet>;

    /// Advance past the current entry.
    fn consume(&mut self);

    fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }
}

/// Factory of per-column writers and readers.
pub trait ColumnStore {
    type Writer: ColumnWriter;
    type Reader: ColumnReader;

    fn column_writer(&self, descriptor: &ColumnDescriptor) -> Result<Self::Writer, ColumnError>;

    /// Fails with [`ColumnError::MissingColumn`] if nothing was written to
    /// `descriptor`.
    fn column_reader(&self, descriptor: &ColumnDescriptor) -> Result<Self::Reader, ColumnError>;
}
