//! Column tree bound to one schema for a read or write session.

use arrow::datatypes::Schema;
use nestcol_arrow::schema_to_arrow;
use nestcol_column::{ColumnIo, ColumnStore, RecordReader, RecordWriter};
use nestcol_core::{HasSchema, SchemaNode};
use nestcol_projection::project_schema;

use crate::error::NestcolError;

/// A schema together with its column tree.
///
/// Projection keeps every ancestor of the selected leaves, so a leaf of a
/// projected session has the same column descriptor as in the full schema.
/// A projected session can therefore read the subset of columns it needs
/// from a store written with the full schema.
#[derive(Debug, Clone)]
pub struct ColumnSession {
    io: ColumnIo,
}

impl ColumnSession {
    /// Session over every column of `schema`.
    pub fn new(schema: &SchemaNode) -> Result<Self, NestcolError> {
        Ok(Self {
            io: ColumnIo::build(schema)?,
        })
    }

    /// Session over the leaves of `schema` selected by `paths`.
    pub fn projected<I, S>(schema: &SchemaNode, paths: I) -> Result<Self, NestcolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let projected = project_schema(schema, paths)?;
        Self::new(&projected)
    }

    /// Session over the schema supplied by `T`.
    pub fn for_type<T: HasSchema>() -> Result<Self, NestcolError> {
        Self::new(&T::schema())
    }

    /// The (possibly projected) schema of this session.
    pub fn schema(&self) -> &SchemaNode {
        self.io.schema()
    }

    pub fn io(&self) -> &ColumnIo {
        &self.io
    }

    pub fn arrow_schema(&self) -> Result<Schema, NestcolError> {
        Ok(schema_to_arrow(self.io.schema())?)
    }

    /// Open a record writer on `store`.
    pub fn writer<S: ColumnStore>(
        &self,
        store: &S,
    ) -> Result<RecordWriter<'_, S::Writer>, NestcolError> {
        Ok(RecordWriter::new(&self.io, store)?)
    }

    /// Open a record reader on `store`.
    pub fn reader<S: ColumnStore>(
        &self,
        store: &S,
    ) -> Result<RecordReader<'_, S::Reader>, NestcolError> {
        Ok(RecordReader::new(&self.io, store)?)
    }
}
