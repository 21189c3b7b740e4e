use std::sync::Arc;

use arrow::datatypes::{DataType, Field as ArrowField};
use nestcol_arrow::{ArrowConvertError, schema_to_arrow};
use nestcol_core::{Field, PrimitiveKind, RecordSchema, SchemaNode};
use nestcol_projection::project_schema;

fn prim(kind: PrimitiveKind) -> SchemaNode {
    SchemaNode::Primitive(kind)
}

fn record(name: &str, fields: Vec<Field>) -> SchemaNode {
    RecordSchema::new(name, fields).unwrap().into()
}

#[test]
fn schema_to_arrow_converts_primitives() -> Result<(), ArrowConvertError> {
    let schema = record(
        "Prims",
        vec![
            Field::new("n", prim(PrimitiveKind::Null)),
            Field::new("b", prim(PrimitiveKind::Boolean)),
            Field::new("i", prim(PrimitiveKind::Int)),
            Field::new("l", prim(PrimitiveKind::Long)),
            Field::new("f", prim(PrimitiveKind::Float)),
            Field::new("d", prim(PrimitiveKind::Double)),
            Field::new("bytes", prim(PrimitiveKind::Bytes)),
            Field::new("s", SchemaNode::nullable(prim(PrimitiveKind::String))),
        ],
    );

    let arrow_schema = schema_to_arrow(&schema)?;

    let types: Vec<(&str, &DataType, bool)> = arrow_schema
        .fields()
        .iter()
        .map(|f| (f.name().as_str(), f.data_type(), f.is_nullable()))
        .collect();
    assert_eq!(
        types,
        vec![
            ("n", &DataType::Null, true),
            ("b", &DataType::Boolean, false),
            ("i", &DataType::Int32, false),
            ("l", &DataType::Int64, false),
            ("f", &DataType::Float32, false),
            ("d", &DataType::Float64, false),
            ("bytes", &DataType::Binary, false),
            ("s", &DataType::Utf8, true),
        ]
    );
    Ok(())
}

#[test]
fn schema_to_arrow_converts_nested_types() -> Result<(), ArrowConvertError> {
    let item = record(
        "Item",
        vec![
            Field::new("a", prim(PrimitiveKind::Int)),
            Field::new("b", SchemaNode::nullable(prim(PrimitiveKind::String))),
        ],
    );
    let schema = record(
        "Rec",
        vec![
            Field::new("items", SchemaNode::array(item)),
            Field::new("holes", SchemaNode::array(SchemaNode::nullable(prim(PrimitiveKind::Long)))),
            Field::new("attrs", SchemaNode::nullable(SchemaNode::map(prim(PrimitiveKind::Double)))),
        ],
    );

    let arrow_schema = schema_to_arrow(&schema)?;

    let item_struct = DataType::Struct(
        vec![
            ArrowField::new("a", DataType::Int32, false),
            ArrowField::new("b", DataType::Utf8, true),
        ]
        .into(),
    );
    assert_eq!(
        arrow_schema.field(0),
        &ArrowField::new(
            "items",
            DataType::List(Arc::new(ArrowField::new("item", item_struct, false))),
            false,
        )
    );
    assert_eq!(
        arrow_schema.field(1).data_type(),
        &DataType::List(Arc::new(ArrowField::new("item", DataType::Int64, true)))
    );

    let entries = DataType::Struct(
        vec![
            ArrowField::new("key", DataType::Utf8, false),
            ArrowField::new("value", DataType::Float64, false),
        ]
        .into(),
    );
    assert_eq!(
        arrow_schema.field(2),
        &ArrowField::new(
            "attrs",
            DataType::Map(Arc::new(ArrowField::new("entries", entries, false)), false),
            true,
        )
    );
    Ok(())
}

#[test]
fn projected_schema_converts_to_narrow_struct() -> Result<(), Box<dyn std::error::Error>> {
    let addr = record(
        "Addr",
        vec![
            Field::new("city", prim(PrimitiveKind::String)),
            Field::new("zip", prim(PrimitiveKind::String)),
        ],
    );
    let schema = record(
        "Rec",
        vec![
            Field::new("id", prim(PrimitiveKind::Long)),
            Field::new("addr", addr),
        ],
    );

    let projected = project_schema(&schema, ["addr.city"])?;
    let arrow_schema = schema_to_arrow(&projected)?;

    assert_eq!(arrow_schema.fields().len(), 1);
    assert_eq!(
        arrow_schema.field(0).data_type(),
        &DataType::Struct(vec![ArrowField::new("city", DataType::Utf8, false)].into())
    );
    Ok(())
}

#[test]
fn non_nullable_union_is_rejected() {
    let schema = record(
        "Rec",
        vec![Field::new(
            "inner",
            record(
                "Inner",
                vec![Field::new(
                    "choice",
                    SchemaNode::Union(vec![prim(PrimitiveKind::Int), prim(PrimitiveKind::String)]),
                )],
            ),
        )],
    );
    match schema_to_arrow(&schema).unwrap_err() {
        ArrowConvertError::UnsupportedUnion { path, .. } => assert_eq!(path, "inner.choice"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn non_record_root_is_rejected() {
    let err = schema_to_arrow(&SchemaNode::array(prim(PrimitiveKind::Int))).unwrap_err();
    assert!(matches!(err, ArrowConvertError::NonRecordRoot { .. }));
    assert_eq!(err.to_string(), "Arrow schema requires a record root, got array");
}
