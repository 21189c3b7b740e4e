use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use nestcol_core::{PrimitiveKind, RecordSchema, SchemaNode};

use crate::error::ArrowConvertError;

/// Converts a record schema into an Arrow `Schema`, one top-level field per
/// record field.
pub fn schema_to_arrow(schema: &SchemaNode) -> Result<Schema, ArrowConvertError> {
    let SchemaNode::Record(record) = schema else {
        return Err(ArrowConvertError::NonRecordRoot {
            schema: Box::new(schema.clone()),
        });
    };
    Ok(Schema::new(record_fields(record, "")?))
}

/// Arrow type used for a primitive column.
pub fn primitive_to_datatype(kind: PrimitiveKind) -> DataType {
    match kind {
        PrimitiveKind::Null => DataType::Null,
        PrimitiveKind::Boolean => DataType::Boolean,
        PrimitiveKind::Int => DataType::Int32,
        PrimitiveKind::Long => DataType::Int64,
        PrimitiveKind::Float => DataType::Float32,
        PrimitiveKind::Double => DataType::Float64,
        PrimitiveKind::Bytes => DataType::Binary,
        PrimitiveKind::String => DataType::Utf8,
    }
}

fn record_fields(record: &RecordSchema, path: &str) -> Result<Vec<Field>, ArrowConvertError> {
    record
        .fields()
        .iter()
        .map(|f| {
            let field_path = if path.is_empty() {
                f.name().to_string()
            } else {
                format!("{path}.{}", f.name())
            };
            node_to_field(f.name(), f.schema(), &field_path)
        })
        .collect()
}

fn node_to_field(name: &str, node: &SchemaNode, path: &str) -> Result<Field, ArrowConvertError> {
    let (inner, nullable) = match node {
        SchemaNode::Union(_) => match node.nullable_branch() {
            Some(inner) => (inner, true),
            None => {
                return Err(ArrowConvertError::UnsupportedUnion {
                    path: path.to_string(),
                    schema: Box::new(node.clone()),
                });
            }
        },
        other => (other, other.is_null()),
    };
    Ok(Field::new(name, node_to_datatype(inner, path)?, nullable))
}

fn node_to_datatype(node: &SchemaNode, path: &str) -> Result<DataType, ArrowConvertError> {
    Ok(match node {
        SchemaNode::Primitive(kind) => primitive_to_datatype(*kind),
        SchemaNode::Record(record) => DataType::Struct(record_fields(record, path)?.into()),
        SchemaNode::Array(element) => {
            let item = node_to_field("item", element, path)?;
            DataType::List(Arc::new(item))
        }
        SchemaNode::Map(value) => {
            let key_field = Field::new("key", DataType::Utf8, false);
            let val_field = node_to_field("value", value, path)?;
            let entry_struct = DataType::Struct(vec![key_field, val_field].into());
            let entry_field = Field::new("entries", entry_struct, false);
            DataType::Map(Arc::new(entry_field), false)
        }
        SchemaNode::Union(_) => {
            return Err(ArrowConvertError::UnsupportedUnion {
                path: path.to_string(),
                schema: Box::new(node.clone()),
            });
        }
    })
}
