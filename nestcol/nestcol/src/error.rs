//! Error type of the `nestcol` facade.

use nestcol_arrow::ArrowConvertError;
use nestcol_column::ColumnError;
use nestcol_core::SchemaError;
use nestcol_projection::ProjectionError;

/// Errors produced by [`ColumnSession`](crate::ColumnSession).
#[derive(Debug, thiserror::Error)]
pub enum NestcolError {
    /// Invalid schema definition.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The requested projection does not apply to the schema.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// Column tree construction, shredding or assembly failed.
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// The schema has no Arrow equivalent.
    #[error(transparent)]
    Arrow(#[from] ArrowConvertError),
}
