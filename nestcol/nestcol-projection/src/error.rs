//! Error types for schema projection.

use nestcol_core::{SchemaError, SchemaNode};

/// Error returned by [`project_schema`](crate::project_schema).
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// No paths were requested. An empty request never falls back to the
    /// unprojected schema.
    #[error("projection requires at least one field path")]
    EmptyProjectionRequest,

    /// Projections start from a record schema.
    #[error("cannot project fields from non-record schema of type {}", .schema.type_name())]
    NonRecordRoot { schema: Box<SchemaNode> },

    /// A path segment names a field the record at that depth does not have.
    #[error("unknown field '{field}' in record '{record}' (path '{path}')")]
    UnknownFieldPath {
        field: String,
        record: String,
        path: String,
    },

    /// The path continues below a node that has no fields: a primitive, or
    /// a union that is not a two-branch nullable union.
    #[error("cannot project '{path}' through schema of type {}", .schema.type_name())]
    UnsupportedProjection {
        path: String,
        schema: Box<SchemaNode>,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
