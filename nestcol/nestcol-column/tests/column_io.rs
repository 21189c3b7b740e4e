mod common;

use common::{document, items, prim, record};
use nestcol_column::{
    ColumnError, ColumnIo, ColumnNode, GroupShape, MemColumnStore, NodeId, NodeKind,
};
use nestcol_core::{Field, PrimitiveKind, SchemaNode};

fn levels(io: &ColumnIo) -> Vec<(String, u32, u32)> {
    io.leaves()
        .map(|leaf| (leaf.dotted_path(), leaf.repetition_level(), leaf.definition_level()))
        .collect()
}

fn leaf(io: &ColumnIo, path: &[&str]) -> NodeId {
    io.leaf_by_path(path)
        .unwrap_or_else(|| panic!("no leaf at {path:?}"))
        .id()
}

#[test]
fn flat_record_has_zero_levels() -> Result<(), ColumnError> {
    let schema = record(
        "RecordOne",
        vec![
            Field::new("str_field", prim(PrimitiveKind::String)),
            Field::new("int_field", prim(PrimitiveKind::Int)),
        ],
    );
    let io = ColumnIo::build(&schema)?;

    assert_eq!(
        levels(&io),
        vec![("str_field".to_string(), 0, 0), ("int_field".to_string(), 0, 0)]
    );
    assert_eq!(io.root().name(), "RecordOne");
    assert!(io.root().field_path().is_empty());
    Ok(())
}

#[test]
fn nullable_field_adds_one_definition_level() -> Result<(), ColumnError> {
    let schema = record(
        "Rec",
        vec![
            Field::new("name", SchemaNode::nullable(prim(PrimitiveKind::String))),
            Field::new("tags", SchemaNode::array(prim(PrimitiveKind::String))),
        ],
    );
    let io = ColumnIo::build(&schema)?;

    let name = io.node(leaf(&io, &["name"]));
    let parent = io.node(name.parent().unwrap());
    assert_eq!(name.definition_level(), parent.definition_level() + 1);
    assert_eq!(name.repetition_level(), parent.repetition_level());
    assert!(name.is_optional());
    assert_eq!(name.schema(), &prim(PrimitiveKind::String));

    let tags = io.node(leaf(&io, &["tags", "array"]));
    assert_eq!((tags.repetition_level(), tags.definition_level()), (1, 1));
    assert!(tags.is_repeated());
    Ok(())
}

#[test]
fn document_levels_match_dremel() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&document())?;

    let expected = [
        ("DocId", 0, 0),
        ("Links.Backward.array", 1, 2),
        ("Links.Forward.array", 1, 2),
        ("Name.array.Language.array.Code", 2, 2),
        ("Name.array.Language.array.Country", 2, 3),
        ("Name.array.Url", 1, 2),
    ];
    let expected: Vec<_> = expected
        .iter()
        .map(|(p, r, d)| (p.to_string(), *r, *d))
        .collect();
    assert_eq!(levels(&io), expected);
    assert_eq!(io.max_repetition_level(), 2);
    assert_eq!(io.max_definition_level(), 3);
    Ok(())
}

#[test]
fn field_index_paths_follow_positions() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&document())?;
    let country = io.node(leaf(&io, &["Name", "array", "Language", "array", "Country"]));

    assert_eq!(country.field_index_path(), &[2, 0, 0, 0, 1]);
    assert_eq!(country.column_index(), Some(4));
    assert_eq!(
        country.descriptor().map(ToString::to_string).as_deref(),
        Some("Name.array.Language.array.Country string r:2 d:3")
    );
    Ok(())
}

#[test]
fn ancestors_run_from_root_to_parent() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&document())?;
    let code = leaf(&io, &["Name", "array", "Language", "array", "Code"]);

    let names: Vec<_> = io
        .ancestors(code)
        .into_iter()
        .map(|id| io.node(id).name().to_string())
        .collect();
    assert_eq!(names, vec!["Document", "Name", "array", "Language", "array"]);
    assert!(io.ancestors(io.root().id()).is_empty());
    Ok(())
}

#[test]
fn group_shapes_and_children() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&items())?;
    let items = io.node(io.root().children()[0]);

    match items.kind() {
        NodeKind::Group { shape, children } => {
            assert_eq!(*shape, GroupShape::Array);
            assert_eq!(children.len(), 1);
            assert_eq!(io.node(children[0]).name(), "array");
        }
        NodeKind::Leaf { .. } => panic!("items should be a group"),
    }
    assert_eq!(items.leaf_range(), 0..2);
    Ok(())
}

#[test]
fn levels_are_monotonic() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&document())?;

    for node in io.nodes() {
        let Some(parent) = node.parent() else {
            continue;
        };
        let parent = io.node(parent);
        let repeated = u32::from(node.is_repeated());
        let optional = u32::from(node.is_optional());
        assert_eq!(node.repetition_level(), parent.repetition_level() + repeated);
        assert_eq!(
            node.definition_level(),
            parent.definition_level() + repeated + optional
        );
    }
    Ok(())
}

#[test]
fn first_and_last_in_repeated_record() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&items())?;
    let a = leaf(&io, &["items", "array", "a"]);
    let b = leaf(&io, &["items", "array", "b"]);

    assert_eq!(io.node(a).repetition_level(), 1);
    assert_eq!(io.node(b).repetition_level(), 1);
    assert!(io.is_first(a, 1)?);
    assert!(!io.is_first(b, 1)?);
    assert!(io.is_last(b, 1)?);
    assert!(!io.is_last(a, 1)?);
    assert!(io.is_first(a, 0)?);
    assert_eq!(io.first(b, 1)?, a);
    Ok(())
}

#[test]
fn first_and_last_in_document() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&document())?;
    let doc_id = leaf(&io, &["DocId"]);
    let code = leaf(&io, &["Name", "array", "Language", "array", "Code"]);
    let country = leaf(&io, &["Name", "array", "Language", "array", "Country"]);
    let url = leaf(&io, &["Name", "array", "Url"]);

    assert!(io.is_first(doc_id, 0)?);
    assert!(io.is_last(url, 0)?);
    assert!(io.is_first(code, 1)?);
    assert!(io.is_last(url, 1)?);
    assert!(!io.is_first(url, 1)?);
    assert!(io.is_first(code, 2)?);
    assert!(io.is_last(country, 2)?);
    assert_eq!(io.first(country, 1)?, code);
    assert_eq!(io.first(country, 0)?, doc_id);
    assert_eq!(io.node(io.parent_at(country, 2)?).name(), "array");
    assert_eq!(io.parent_at(country, 0)?, io.root().id());
    Ok(())
}

#[test]
fn each_repeated_group_has_exactly_one_first_and_last() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&document())?;

    let owners: Vec<(NodeId, u32)> = io
        .nodes()
        .iter()
        .filter(|n| !n.is_leaf() && (n.is_repeated() || n.parent().is_none()))
        .map(|n| (n.id(), n.repetition_level()))
        .collect();
    assert!(!owners.is_empty());

    for (owner, r) in owners {
        let leaves: Vec<&ColumnNode> =
            io.node(owner).leaf_range().filter_map(|i| io.leaf(i)).collect();
        let mut firsts = 0;
        let mut lasts = 0;
        for l in &leaves {
            firsts += usize::from(io.is_first(l.id(), r)?);
            lasts += usize::from(io.is_last(l.id(), r)?);
        }
        assert_eq!(firsts, 1, "group {}", io.node(owner).dotted_path());
        assert_eq!(lasts, 1, "group {}", io.node(owner).dotted_path());
    }
    Ok(())
}

#[test]
fn array_of_array_applies_both_increments() -> Result<(), ColumnError> {
    let schema = record(
        "Rec",
        vec![Field::new(
            "matrix",
            SchemaNode::array(SchemaNode::array(prim(PrimitiveKind::Int))),
        )],
    );
    let io = ColumnIo::build(&schema)?;

    let cell = io.node(leaf(&io, &["matrix", "array", "array"]));
    assert_eq!((cell.repetition_level(), cell.definition_level()), (2, 2));
    assert!(io.is_first(cell.id(), 2)?);
    assert!(io.is_last(cell.id(), 1)?);
    Ok(())
}

#[test]
fn nullable_array_and_nullable_element() -> Result<(), ColumnError> {
    let schema = record(
        "Rec",
        vec![
            Field::new(
                "maybe_list",
                SchemaNode::nullable(SchemaNode::array(prim(PrimitiveKind::Int))),
            ),
            Field::new("holes", SchemaNode::array(SchemaNode::nullable(prim(PrimitiveKind::Int)))),
        ],
    );
    let io = ColumnIo::build(&schema)?;

    assert_eq!(
        levels(&io),
        vec![
            ("maybe_list.array".to_string(), 1, 2),
            ("holes.array".to_string(), 1, 2),
        ]
    );
    let hole = io.node(leaf(&io, &["holes", "array"]));
    assert!(hole.is_repeated() && hole.is_optional());
    Ok(())
}

#[test]
fn map_value_is_repeated() -> Result<(), ColumnError> {
    let schema = record(
        "Rec",
        vec![Field::new("attrs", SchemaNode::map(prim(PrimitiveKind::String)))],
    );
    let io = ColumnIo::build(&schema)?;

    let value = io.node(leaf(&io, &["attrs", "value"]));
    assert_eq!((value.repetition_level(), value.definition_level()), (1, 1));
    assert!(matches!(
        io.node(value.parent().unwrap()).kind(),
        NodeKind::Group { shape: GroupShape::Map, .. }
    ));
    Ok(())
}

#[test]
fn column_paths_list_every_leaf() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&items())?;
    assert_eq!(
        io.column_paths(),
        vec![
            vec!["items".to_string(), "array".to_string(), "a".to_string()],
            vec!["items".to_string(), "array".to_string(), "b".to_string()],
        ]
    );
    assert_eq!(io.leaf_count(), 2);
    Ok(())
}

#[test]
fn empty_record_has_no_columns() -> Result<(), ColumnError> {
    let schema = record("Rec", vec![Field::new("empty", record("Empty", vec![]))]);
    let io = ColumnIo::build(&schema)?;
    assert_eq!(io.leaf_count(), 0);
    assert_eq!(io.first_leaf(io.root().id()), None);
    Ok(())
}

#[test]
fn column_writer_comes_from_the_store() -> Result<(), ColumnError> {
    use nestcol_column::ColumnWriter;

    let io = ColumnIo::build(&items())?;
    let store = MemColumnStore::new();
    let a = leaf(&io, &["items", "array", "a"]);

    let writer = io.column_writer(a, &store)?;
    assert_eq!(writer.descriptor().dotted_path(), "items.array.a");
    assert_eq!(store.column_count(), 1);
    Ok(())
}

#[test]
fn depth_beyond_leaf_level_is_rejected() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&items())?;
    let a = leaf(&io, &["items", "array", "a"]);

    match io.is_first(a, 2).unwrap_err() {
        ColumnError::InvalidRepetitionDepth { path, depth, max } => {
            assert_eq!(path, "items.array.a");
            assert_eq!(depth, 2);
            assert_eq!(max, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn group_is_not_a_leaf() -> Result<(), ColumnError> {
    let io = ColumnIo::build(&items())?;
    let err = io.is_first(io.root().id(), 0).unwrap_err();
    assert!(matches!(err, ColumnError::NotALeaf { .. }));

    let store = MemColumnStore::new();
    assert!(matches!(
        io.column_reader(io.root().id(), &store),
        Err(ColumnError::NotALeaf { .. })
    ));
    Ok(())
}

#[test]
fn non_nullable_union_is_unsupported() {
    let schema = record(
        "Rec",
        vec![Field::new(
            "choice",
            SchemaNode::Union(vec![prim(PrimitiveKind::Int), prim(PrimitiveKind::String)]),
        )],
    );
    match ColumnIo::build(&schema).unwrap_err() {
        ColumnError::UnsupportedSchemaShape { path, .. } => assert_eq!(path, "choice"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn nested_union_is_unsupported() {
    let nested = SchemaNode::nullable(SchemaNode::nullable(prim(PrimitiveKind::Int)));
    let schema = record("Rec", vec![Field::new("n", nested)]);
    assert!(matches!(
        ColumnIo::build(&schema),
        Err(ColumnError::UnsupportedSchemaShape { .. })
    ));
}

#[test]
fn non_record_root_is_rejected() {
    let err = ColumnIo::build(&SchemaNode::array(prim(PrimitiveKind::Int))).unwrap_err();
    assert!(matches!(err, ColumnError::NonRecordRoot { .. }));
}
