//! Error types for the schema model.

/// Error returned while building or parsing a [`SchemaNode`](crate::SchemaNode).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Two fields of one record share a name.
    #[error("duplicate field '{field}' in record '{record}'")]
    DuplicateField { record: String, field: String },

    /// A JSON schema document defines the same full record name twice.
    #[error("can't redefine record '{0}'")]
    DuplicateName(String),

    /// The schema document is not valid JSON.
    #[error("invalid schema JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A JSON schema object lacks an attribute its type requires.
    #[error("missing attribute '{attribute}' in {context}")]
    MissingAttribute {
        attribute: &'static str,
        context: String,
    },

    /// A type name is neither a primitive nor a previously defined record.
    #[error("unknown or unsupported type '{0}'")]
    UnknownType(String),
}

/// A [`Value`](crate::Value) did not have the expected primitive kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: String,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
