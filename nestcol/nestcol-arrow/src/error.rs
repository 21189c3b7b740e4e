use nestcol_core::SchemaNode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    #[error("Arrow schema requires a record root, got {}", .schema.type_name())]
    NonRecordRoot { schema: Box<SchemaNode> },
    #[error("union at '{path}' has no Arrow equivalent (only [null, T] unions are supported)")]
    UnsupportedUnion { path: String, schema: Box<SchemaNode> },
}
