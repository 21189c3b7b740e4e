use nestcol_core::Value;

use crate::{
    error::ColumnError,
    io::{ColumnIo, GroupShape, NodeId, NodeKind},
    store::{ColumnReader, ColumnStore},
};

/// Assembles [`Value`] records from the columns of a [`ColumnIo`].
///
/// Every decision is taken on the first column of the group being read: its
/// definition level tells whether the group is null or empty, and its
/// repetition level tells whether the next entry continues the current array.
pub struct RecordReader<'a, R> {
    io: &'a ColumnIo,
    readers: Vec<R>,
    records: usize,
}

impl<'a, R: ColumnReader> RecordReader<'a, R> {
    /// Open a reader for every leaf of `io` in `store`.
    pub fn new<S>(io: &'a ColumnIo, store: &S) -> Result<Self, ColumnError>
    where
        S: ColumnStore<Reader = R>,
    {
        let readers = io
            .leaves()
            .map(|leaf| io.column_reader(leaf.id(), store))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(columns = readers.len(), "opened record reader");
        Ok(Self {
            io,
            readers,
            records: 0,
        })
    }

    /// Assemble the next record, `None` once the columns are exhausted.
    pub fn read(&mut self) -> Result<Option<Value>, ColumnError> {
        let io = self.io;
        let root = io.root().id();
        let Some(probe) = io.first_leaf(root) else {
            return Ok(None);
        };
        if self.reader(probe).is_exhausted() {
            if let Some(leftover) = self.readers.iter().find(|r| !r.is_exhausted()) {
                return Err(ColumnError::CorruptColumn {
                    path: leftover.descriptor().dotted_path(),
                    detail: "entries left after the last record".to_string(),
                });
            }
            return Ok(None);
        }

        let record = self.read_node(root)?;
        self.records += 1;
        tracing::trace!(record = self.records, "assembled record");
        Ok(Some(record))
    }

    /// Assemble every remaining record.
    pub fn read_all(&mut self) -> Result<Vec<Value>, ColumnError> {
        let mut records = Vec::new();
        while let Some(record) = self.read()? {
            records.push(record);
        }
        Ok(records)
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    fn read_node(&mut self, id: NodeId) -> Result<Value, ColumnError> {
        let io = self.io;
        let node = io.node(id);
        let probe = io.first_leaf(id);

        if node.is_optional()
            && let Some(probe) = probe
        {
            let (_, d) = self.peek(probe)?;
            if d < node.definition_level() {
                self.skip(id)?;
                return Ok(Value::Null);
            }
        }

        match node.kind() {
            NodeKind::Leaf { .. } => {
                let column = node.column_index().unwrap_or_default();
                let triplet = self.readers[column]
                    .current()
                    .cloned()
                    .ok_or_else(|| truncated(&self.readers[column]))?;
                self.readers[column].consume();
                match triplet.value {
                    Some(value) if triplet.definition_level == node.definition_level() => Ok(value),
                    _ => Err(ColumnError::CorruptColumn {
                        path: node.dotted_path(),
                        detail: format!(
                            "expected a value at d:{}, found d:{}",
                            node.definition_level(),
                            triplet.definition_level
                        ),
                    }),
                }
            }
            NodeKind::Group {
                shape: GroupShape::Record,
                children,
            } => children
                .iter()
                .map(|child| self.read_node(*child))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Record),
            NodeKind::Group {
                shape: GroupShape::Array,
                children,
            } => {
                let Some(probe) = probe else {
                    return Ok(Value::Array(Vec::new()));
                };
                let (_, d) = self.peek(probe)?;
                if d <= node.definition_level() {
                    self.skip(id)?;
                    return Ok(Value::Array(Vec::new()));
                }

                let element = children[0];
                let element_r = io.node(element).repetition_level();
                let mut items = Vec::new();
                loop {
                    items.push(self.read_node(element)?);
                    match self.reader(probe).current() {
                        Some(next) if next.repetition_level == element_r => {}
                        _ => break,
                    }
                }
                Ok(Value::Array(items))
            }
            NodeKind::Group {
                shape: GroupShape::Map, ..
            } => Err(ColumnError::UnsupportedValue {
                path: node.dotted_path(),
                reason: "map keys have no column",
            }),
        }
    }

    fn reader(&self, leaf: NodeId) -> &R {
        let column = self.io.node(leaf).column_index().unwrap_or_default();
        &self.readers[column]
    }

    /// Levels of the entry under `leaf`'s cursor.
    fn peek(&self, leaf: NodeId) -> Result<(u32, u32), ColumnError> {
        let reader = self.reader(leaf);
        reader
            .current()
            .map(|t| (t.repetition_level, t.definition_level))
            .ok_or_else(|| truncated(reader))
    }

    /// Consume one entry from every column below `id`.
    fn skip(&mut self, id: NodeId) -> Result<(), ColumnError> {
        for column in self.io.node(id).leaf_range() {
            let reader = &mut self.readers[column];
            if reader.is_exhausted() {
                return Err(truncated(reader));
            }
            reader.consume();
        }
        Ok(())
    }
}

fn truncated<R: ColumnReader>(reader: &R) -> ColumnError {
    ColumnError::CorruptColumn {
        path: reader.descriptor().dotted_path(),
        detail: "column ended in the middle of a record".to_string(),
    }
}
