use nestcol_core::{PrimitiveKind, Value};

use crate::{
    error::ColumnError,
    io::{ColumnIo, GroupShape, NodeId, NodeKind},
    store::{ColumnStore, ColumnWriter, Triplet},
};

/// Shreds [`Value`] records into one column per leaf of a [`ColumnIo`].
///
/// A record is checked against the tree and staged in full before any of its
/// entries reach the store, so a rejected record leaves the columns as they
/// were. If the store itself fails while a record is being appended, the
/// writer refuses further records with [`ColumnError::WriterPoisoned`].
pub struct RecordWriter<'a, W> {
    io: &'a ColumnIo,
    writers: Vec<W>,
    staged: Vec<(usize, Triplet)>,
    records: usize,
    poisoned: bool,
}

impl<'a, W: ColumnWriter> RecordWriter<'a, W> {
    /// Open a writer for every leaf of `io` in `store`.
    pub fn new<S>(io: &'a ColumnIo, store: &S) -> Result<Self, ColumnError>
    where
        S: ColumnStore<Writer = W>,
    {
        let writers = io
            .leaves()
            .map(|leaf| io.column_writer(leaf.id(), store))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(columns = writers.len(), "opened record writer");
        Ok(Self {
            io,
            writers,
            staged: Vec::new(),
            records: 0,
            poisoned: false,
        })
    }

    /// Shred one record. `record` must be a [`Value::Record`] shaped like the
    /// tree's root.
    pub fn write(&mut self, record: &Value) -> Result<(), ColumnError> {
        if self.poisoned {
            return Err(ColumnError::WriterPoisoned);
        }
        self.staged.clear();
        let root = self.io.root().id();
        self.stage_node(root, record, 0)?;
        self.flush()?;
        self.records += 1;
        Ok(())
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn into_writers(self) -> Vec<W> {
        self.writers
    }

    fn flush(&mut self) -> Result<(), ColumnError> {
        for (column, triplet) in self.staged.drain(..) {
            let Triplet {
                repetition_level: r,
                definition_level: d,
                value,
            } = triplet;
            let appended = match value {
                Some(value) => self.writers[column].write(value, r, d),
                None => self.writers[column].write_null(r, d),
            };
            if let Err(err) = appended {
                tracing::warn!(column, error = %err, "column append failed mid-record");
                self.poisoned = true;
                return Err(err);
            }
        }
        Ok(())
    }

    fn stage_node(&mut self, id: NodeId, value: &Value, r: u32) -> Result<(), ColumnError> {
        let io = self.io;
        let node = io.node(id);

        if value.is_null() && node.is_optional() {
            self.stage_nulls(id, r, node.definition_level() - 1);
            return Ok(());
        }

        match node.kind() {
            NodeKind::Leaf {
                descriptor,
                column_index,
            } => {
                if value.is_null() && descriptor.primitive() != PrimitiveKind::Null {
                    return Err(ColumnError::NullForRequired {
                        path: node.dotted_path(),
                    });
                }
                value
                    .check_kind(descriptor.primitive())
                    .map_err(|source| ColumnError::ValueTypeMismatch {
                        path: descriptor.dotted_path(),
                        source,
                    })?;
                let triplet = Triplet::value(value.clone(), r, node.definition_level());
                self.staged.push((*column_index, triplet));
                Ok(())
            }
            NodeKind::Group {
                shape: GroupShape::Record,
                children,
            } => {
                let Value::Record(fields) = value else {
                    return Err(shape_error(io, id, value, "record"));
                };
                if fields.len() != children.len() {
                    return Err(ColumnError::ValueShapeMismatch {
                        path: node.dotted_path(),
                        expected: format!("record with {} fields", children.len()),
                        actual: format!("record with {} fields", fields.len()),
                    });
                }
                for (child, field) in children.iter().zip(fields) {
                    self.stage_node(*child, field, r)?;
                }
                Ok(())
            }
            NodeKind::Group {
                shape: GroupShape::Array,
                children,
            } => {
                let Value::Array(items) = value else {
                    return Err(shape_error(io, id, value, "array"));
                };
                let element = children[0];
                if items.is_empty() {
                    self.stage_nulls(element, r, node.definition_level());
                    return Ok(());
                }
                let element_r = io.node(element).repetition_level();
                for (i, item) in items.iter().enumerate() {
                    let item_r = if i == 0 { r } else { element_r };
                    self.stage_node(element, item, item_r)?;
                }
                Ok(())
            }
            NodeKind::Group {
                shape: GroupShape::Map, ..
            } => match value {
                Value::Map(_) => Err(ColumnError::UnsupportedValue {
                    path: node.dotted_path(),
                    reason: "map keys have no column",
                }),
                other => Err(shape_error(io, id, other, "map")),
            },
        }
    }

    /// Stage a null at level `d` for every column below `id`.
    fn stage_nulls(&mut self, id: NodeId, r: u32, d: u32) {
        for column in self.io.node(id).leaf_range() {
            self.staged.push((column, Triplet::null(r, d)));
        }
    }
}

fn shape_error(io: &ColumnIo, id: NodeId, value: &Value, expected: &str) -> ColumnError {
    let path = io.node(id).dotted_path();
    if value.is_null() {
        ColumnError::NullForRequired { path }
    } else {
        ColumnError::ValueShapeMismatch {
            path,
            expected: expected.to_string(),
            actual: value.variant_name().to_string(),
        }
    }
}
