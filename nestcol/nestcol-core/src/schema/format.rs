use std::fmt::{Error, Result, Write as _};

use super::{Field, SchemaNode};

/// Format a schema in a readable style:
/// primitive fields are rendered in one line, compound fields are pretty-printed.
/// A nullable union is rendered as its non-null branch with `nullable: true`.
pub fn format_schema(schema: &SchemaNode) -> std::result::Result<String, Error> {
    let mut out = String::new();

    match schema {
        SchemaNode::Record(record) => {
            writeln!(out, "{}: {}", schema.type_name(), record.full_name())?;
            for field in record.fields() {
                format_field(field, 0, &mut out)?;
            }
        }
        other => format_labeled_type("root", other, 0, &mut out)?,
    }

    Ok(out)
}

fn format_field(field: &Field, indent: usize, out: &mut String) -> Result {
    format_labeled_type(field.name(), field.schema(), indent, out)
}

fn format_labeled_type(
    label: &str,
    schema: &SchemaNode,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    let (schema, nullable) = match schema.nullable_branch() {
        Some(branch) => (branch, true),
        None => (schema, false),
    };
    if schema.is_primitive() {
        writeln!(
            out,
            "{pad}{label}: {{ type: {}, nullable: {nullable} }}",
            schema.type_name()
        )?;
    } else {
        writeln!(out, "{pad}{label}:")?;
        format_compound(schema, nullable, indent + 4, out)?;
    }
    Ok(())
}

fn format_compound(schema: &SchemaNode, nullable: bool, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}type: {}", schema.type_name())?;
    writeln!(out, "{pad}nullable: {nullable}")?;

    match schema {
        SchemaNode::Record(record) => {
            writeln!(out, "{pad}name: {}", record.full_name())?;
            writeln!(out, "{pad}fields:")?;
            for child in record.fields() {
                format_field(child, indent + 4, out)?;
            }
        }
        SchemaNode::Array(element) => format_labeled_type("items", element, indent, out)?,
        SchemaNode::Map(value) => format_labeled_type("values", value, indent, out)?,
        SchemaNode::Union(branches) => {
            for (i, branch) in branches.iter().enumerate() {
                format_labeled_type(&format!("branch{i}"), branch, indent, out)?;
            }
        }
        SchemaNode::Primitive(kind) => unreachable!("{kind:?} is not a compound type"),
    }

    Ok(())
}
