//! In-memory representation of nested records.

use std::sync::Arc;

use crate::{error::ValueTypeError, schema::PrimitiveKind};

/// A record value shaped like a [`SchemaNode`](crate::SchemaNode).
///
/// Record values are positional: `Record(values)[i]` belongs to the field at
/// position `i`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Arc<[u8]>),
    String(Arc<str>),
    Record(Vec<Value>),
    Array(Vec<Value>),
    Map(Vec<(Arc<str>, Value)>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Arc::from(b.as_ref()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The primitive kind of a scalar value, `None` for compound values.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        Some(match self {
            Value::Null => PrimitiveKind::Null,
            Value::Boolean(_) => PrimitiveKind::Boolean,
            Value::Int(_) => PrimitiveKind::Int,
            Value::Long(_) => PrimitiveKind::Long,
            Value::Float(_) => PrimitiveKind::Float,
            Value::Double(_) => PrimitiveKind::Double,
            Value::Bytes(_) => PrimitiveKind::Bytes,
            Value::String(_) => PrimitiveKind::String,
            Value::Record(_) | Value::Array(_) | Value::Map(_) => return None,
        })
    }

    /// Fails unless this value is a scalar of exactly `kind`.
    pub fn check_kind(&self, kind: PrimitiveKind) -> Result<(), ValueTypeError> {
        match self.primitive_kind() {
            Some(actual) if actual == kind => Ok(()),
            _ => Err(self.type_mismatch(kind.type_name())),
        }
    }

    pub fn type_mismatch(&self, expected: impl Into<String>) -> ValueTypeError {
        ValueTypeError::new(expected, self.variant_name())
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Record(_) => "record",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::string(v)
    }
}
