use std::{fmt::Write, path::PathBuf};

use anyhow::Result;
use clap::Args;
use nestcol::column::{ColumnError, ColumnIo, NodeId};

use crate::input::{emit, load_schema};

#[derive(Args)]
pub struct ColumnsArgs {
    /// Path to the JSON schema file
    input: PathBuf,

    /// Project to these dotted leaf paths first
    #[arg(short, long, num_args = 1..)]
    project: Vec<String>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ColumnsArgs {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(&self.input, &self.project)?;
        let io = ColumnIo::build(&schema)?;
        emit(self.output, describe_columns(&io)?.trim_end())
    }
}

/// One line per column: descriptor, field-index path, and the depths at
/// which the column opens (`first`) or closes (`last`) its group.
fn describe_columns(io: &ColumnIo) -> Result<String> {
    let mut out = String::new();
    for leaf in io.leaves() {
        let Some(descriptor) = leaf.descriptor() else {
            continue;
        };
        let index_path = leaf
            .field_index_path()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        let first = depths(io, leaf.id(), ColumnIo::is_first)?;
        let last = depths(io, leaf.id(), ColumnIo::is_last)?;
        writeln!(out, "{descriptor}  [{index_path}]  first: {first}  last: {last}")?;
    }
    Ok(out)
}

fn depths(
    io: &ColumnIo,
    leaf: NodeId,
    pred: fn(&ColumnIo, NodeId, u32) -> Result<bool, ColumnError>,
) -> Result<String, ColumnError> {
    let mut hits = Vec::new();
    for r in 0..=io.node(leaf).repetition_level() {
        if pred(io, leaf, r)? {
            hits.push(r.to_string());
        }
    }
    Ok(if hits.is_empty() { "-".to_string() } else { hits.join(",") })
}

#[cfg(test)]
mod tests {
    use nestcol::core::{Field, PrimitiveKind, RecordSchema, SchemaNode};

    use super::*;

    #[test]
    fn describes_repeated_record_columns() -> Result<()> {
        let item = RecordSchema::new(
            "Item",
            vec![
                Field::new("a", PrimitiveKind::Int.into()),
                Field::new("b", PrimitiveKind::Int.into()),
            ],
        )?;
        let items = Field::new("items", SchemaNode::array(item.into()));
        let schema: SchemaNode = RecordSchema::new("Rec", vec![items])?.into();

        let text = describe_columns(&ColumnIo::build(&schema)?)?;

        assert_eq!(
            text,
            "items.array.a int r:1 d:1  [0.0.0]  first: 0,1  last: -\n\
             items.array.b int r:1 d:1  [0.0.1]  first: -  last: 0,1\n"
        );
        Ok(())
    }
}
