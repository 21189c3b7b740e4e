#![allow(dead_code)]

use nestcol_core::{Field, PrimitiveKind, RecordSchema, SchemaNode};

pub fn prim(kind: PrimitiveKind) -> SchemaNode {
    SchemaNode::Primitive(kind)
}

pub fn record(name: &str, fields: Vec<Field>) -> SchemaNode {
    RecordSchema::new(name, fields).unwrap().into()
}

/// The `Document` schema of the Dremel paper.
///
/// ```text
/// Document
///   DocId: long
///   Links: [null, Links { Backward: [long], Forward: [long] }]
///   Name: [Name { Language: [Language { Code: string, Country: [null, string] }],
///                 Url: [null, string] }]
/// ```
pub fn document() -> SchemaNode {
    let links = record(
        "Links",
        vec![
            Field::new("Backward", SchemaNode::array(prim(PrimitiveKind::Long))),
            Field::new("Forward", SchemaNode::array(prim(PrimitiveKind::Long))),
        ],
    );
    let language = record(
        "Language",
        vec![
            Field::new("Code", prim(PrimitiveKind::String)),
            Field::new("Country", SchemaNode::nullable(prim(PrimitiveKind::String))),
        ],
    );
    let name = record(
        "Name",
        vec![
            Field::new("Language", SchemaNode::array(language)),
            Field::new("Url", SchemaNode::nullable(prim(PrimitiveKind::String))),
        ],
    );
    record(
        "Document",
        vec![
            Field::new("DocId", prim(PrimitiveKind::Long)),
            Field::new("Links", SchemaNode::nullable(links)),
            Field::new("Name", SchemaNode::array(name)),
        ],
    )
}

/// `Record{items: Array(Record{a: int, b: int})}`
pub fn items() -> SchemaNode {
    let item = record(
        "Item",
        vec![
            Field::new("a", prim(PrimitiveKind::Int)),
            Field::new("b", prim(PrimitiveKind::Int)),
        ],
    );
    record("Rec", vec![Field::new("items", SchemaNode::array(item))])
}
