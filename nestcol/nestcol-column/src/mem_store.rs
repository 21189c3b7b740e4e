use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use nestcol_core::Value;

use crate::{
    descriptor::ColumnDescriptor,
    error::ColumnError,
    store::{ColumnReader, ColumnStore, ColumnWriter, Triplet},
};

type Column = Arc<Mutex<Vec<Triplet>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory [`ColumnStore`]. Each column sits behind its own mutex, so
/// writers of different columns may run on different threads.
#[derive(Debug, Default)]
pub struct MemColumnStore {
    columns: Mutex<HashMap<ColumnDescriptor, Column>>,
}

impl MemColumnStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written to `descriptor`, `None` if the column was
    /// never opened for writing.
    pub fn triplets(&self, descriptor: &ColumnDescriptor) -> Option<Vec<Triplet>> {
        let column = lock(&self.columns).get(descriptor).cloned()?;
        let triplets = lock(&column).clone();
        Some(triplets)
    }

    pub fn column_count(&self) -> usize {
        lock(&self.columns).len()
    }
}

impl ColumnStore for MemColumnStore {
    type Writer = MemColumnWriter;
    type Reader = MemColumnReader;

    fn column_writer(&self, descriptor: &ColumnDescriptor) -> Result<MemColumnWriter, ColumnError> {
        let column = lock(&self.columns)
            .entry(descriptor.clone())
            .or_default()
            .clone();
        Ok(MemColumnWriter {
            descriptor: descriptor.clone(),
            column,
        })
    }

    fn column_reader(&self, descriptor: &ColumnDescriptor) -> Result<MemColumnReader, ColumnError> {
        let triplets = self
            .triplets(descriptor)
            .ok_or_else(|| ColumnError::MissingColumn {
                column: descriptor.to_string(),
            })?;
        Ok(MemColumnReader {
            descriptor: descriptor.clone(),
            triplets,
            position: 0,
        })
    }
}

#[derive(Debug)]
pub struct MemColumnWriter {
    descriptor: ColumnDescriptor,
    column: Column,
}

impl MemColumnWriter {
    fn check_levels(
        &self,
        repetition_level: u32,
        definition_level: u32,
        defined: bool,
    ) -> Result<(), ColumnError> {
        let max_r = self.descriptor.repetition_level();
        let max_d = self.descriptor.definition_level();
        let definition_ok = if defined {
            definition_level == max_d
        } else {
            definition_level < max_d
        };
        if repetition_level <= max_r && definition_ok {
            Ok(())
        } else {
            Err(ColumnError::InvalidLevels {
                column: self.descriptor.to_string(),
                repetition_level,
                definition_level,
            })
        }
    }
}

impl ColumnWriter for MemColumnWriter {
    fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }

    fn write(
        &mut self,
        value: Value,
        repetition_level: u32,
        definition_level: u32,
    ) -> Result<(), ColumnError> {
        value
            .check_kind(self.descriptor.primitive())
            .map_err(|source| ColumnError::ValueTypeMismatch {
                path: self.descriptor.dotted_path(),
                source,
            })?;
        self.check_levels(repetition_level, definition_level, true)?;
        lock(&self.column).push(Triplet::value(value, repetition_level, definition_level));
        Ok(())
    }

    fn write_null(
        &mut self,
        repetition_level: u32,
        definition_level: u32,
    ) -> Result<(), ColumnError> {
        self.check_levels(repetition_level, definition_level, false)?;
        lock(&self.column).push(Triplet::null(repetition_level, definition_level));
        Ok(())
    }
}

#[derive(Debug)]
pub struct MemColumnReader {
    descriptor: ColumnDescriptor,
    triplets: Vec<Triplet>,
    position: usize,
}

impl MemColumnReader {
    /// Entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.triplets.len() - self.position
    }
}

impl ColumnReader for MemColumnReader {
    fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }

    fn current(&self) -> Option<&Triplet> {
        self.triplets.get(self.position)
    }

    fn consume(&mut self) {
        if self.position < self.triplets.len() {
            self.position += 1;
        }
    }
}
