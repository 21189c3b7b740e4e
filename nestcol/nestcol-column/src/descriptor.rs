use std::fmt::{Display, Formatter, Result};

use nestcol_core::PrimitiveKind;

/// Identity of one physical column: field path from the root, primitive kind
/// and the maximum repetition and definition levels of its values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDescriptor {
    path: Vec<String>,
    primitive: PrimitiveKind,
    repetition_level: u32,
    definition_level: u32,
}

impl ColumnDescriptor {
    pub fn new(
        path: Vec<String>,
        primitive: PrimitiveKind,
        repetition_level: u32,
        definition_level: u32,
    ) -> Self {
        Self {
            path,
            primitive,
            repetition_level,
            definition_level,
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    pub fn primitive(&self) -> PrimitiveKind {
        self.primitive
    }

    pub fn repetition_level(&self) -> u32 {
        self.repetition_level
    }

    pub fn definition_level(&self) -> u32 {
        self.definition_level
    }
}

impl Display for ColumnDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{} {} r:{} d:{}",
            self.dotted_path(),
            self.primitive,
            self.repetition_level,
            self.definition_level
        )
    }
}
