use std::fmt::{Display, Formatter, Result};

use crate::error::SchemaError;

/// Primitive (leaf) types of the schema model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl PrimitiveKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Null => "null",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Bytes => "bytes",
            PrimitiveKind::String => "string",
        }
    }

    /// Parse a primitive type name as it appears in the JSON schema form.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "null" => PrimitiveKind::Null,
            "boolean" => PrimitiveKind::Boolean,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            "bytes" => PrimitiveKind::Bytes,
            "string" => PrimitiveKind::String,
            _ => return None,
        })
    }
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// A node of a nested record schema.
///
/// Optional values follow the nullable-as-union convention: a field that may
/// be absent is declared as a two-branch [`SchemaNode::Union`] of `null` and
/// the real type. Unions of any other shape are representable but rejected by
/// projection and column-tree construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Primitive(PrimitiveKind),
    Record(RecordSchema),
    Array(Box<SchemaNode>),
    Map(Box<SchemaNode>),
    Union(Vec<SchemaNode>),
}

impl SchemaNode {
    pub fn null() -> Self {
        SchemaNode::Primitive(PrimitiveKind::Null)
    }

    /// `[null, inner]`.
    pub fn nullable(inner: SchemaNode) -> Self {
        SchemaNode::Union(vec![SchemaNode::null(), inner])
    }

    pub fn array(element: SchemaNode) -> Self {
        SchemaNode::Array(Box::new(element))
    }

    pub fn map(value: SchemaNode) -> Self {
        SchemaNode::Map(Box::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SchemaNode::Primitive(PrimitiveKind::Null))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, SchemaNode::Primitive(_))
    }

    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self {
            SchemaNode::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the non-null branch if this node is a nullable union, i.e. a
    /// union of exactly two branches where exactly one is `null`.
    pub fn nullable_branch(&self) -> Option<&SchemaNode> {
        let SchemaNode::Union(branches) = self else {
            return None;
        };
        match branches.as_slice() {
            [a, b] if a.is_null() && !b.is_null() => Some(b),
            [a, b] if !a.is_null() && b.is_null() => Some(a),
            _ => None,
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable_branch().is_some()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaNode::Primitive(kind) => kind.type_name(),
            SchemaNode::Record(record) if record.is_error() => "error",
            SchemaNode::Record(_) => "record",
            SchemaNode::Array(_) => "array",
            SchemaNode::Map(_) => "map",
            SchemaNode::Union(_) => "union",
        }
    }

    /// Dotted paths of every primitive leaf reachable from this node, in
    /// declaration order. Array elements, map values and union branches do
    /// not contribute a path segment.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_leaf_paths(self, "", &mut out);
        out
    }
}

fn collect_leaf_paths(node: &SchemaNode, prefix: &str, out: &mut Vec<String>) {
    match node {
        SchemaNode::Primitive(_) => {
            if !prefix.is_empty() && !out.iter().any(|p| p == prefix) {
                out.push(prefix.to_string());
            }
        }
        SchemaNode::Record(record) => {
            for field in record.fields() {
                let path = if prefix.is_empty() {
                    field.name().to_string()
                } else {
                    format!("{prefix}.{}", field.name())
                };
                collect_leaf_paths(field.schema(), &path, out);
            }
        }
        SchemaNode::Array(inner) | SchemaNode::Map(inner) => collect_leaf_paths(inner, prefix, out),
        SchemaNode::Union(branches) => {
            for branch in branches.iter().filter(|b| !b.is_null()) {
                collect_leaf_paths(branch, prefix, out);
            }
        }
    }
}

impl From<PrimitiveKind> for SchemaNode {
    fn from(kind: PrimitiveKind) -> Self {
        SchemaNode::Primitive(kind)
    }
}

impl From<RecordSchema> for SchemaNode {
    fn from(record: RecordSchema) -> Self {
        SchemaNode::Record(record)
    }
}

impl Display for SchemaNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_schema(self)?;
        f.write_str(&text)
    }
}

/// A named record type with ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    name: String,
    namespace: Option<String>,
    doc: Option<String>,
    is_error: bool,
    fields: Vec<Field>,
}

impl RecordSchema {
    /// Create a record, assigning field positions `0..n` in declaration order.
    ///
    /// Returns [`SchemaError::DuplicateField`] if two fields share a name.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<Field>,
    ) -> std::result::Result<Self, SchemaError> {
        let mut record = Self {
            name: name.into(),
            namespace: None,
            doc: None,
            is_error: false,
            fields: Vec::new(),
        };
        record.set_fields(fields)?;
        Ok(record)
    }

    /// A record with the same name, namespace, doc and error flag as `self`
    /// but a different field list.
    pub fn with_fields(&self, fields: Vec<Field>) -> std::result::Result<Self, SchemaError> {
        let mut record = Self {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            doc: self.doc.clone(),
            is_error: self.is_error,
            fields: Vec::new(),
        };
        record.set_fields(fields)?;
        Ok(record)
    }

    fn set_fields(&mut self, fields: Vec<Field>) -> std::result::Result<(), SchemaError> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    record: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        self.fields = fields
            .into_iter()
            .enumerate()
            .map(|(position, field)| Field { position, ..field })
            .collect();
        Ok(())
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_error_flag(mut self, is_error: bool) -> Self {
        self.is_error = is_error;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// `namespace.name`, or just `name` without a namespace.
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}.{}", self.name),
            _ => self.name.clone(),
        }
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A record field: name, ordinal position, type, optional default and doc.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    position: usize,
    schema: SchemaNode,
    default: Option<serde_json::Value>,
    doc: Option<String>,
}

impl Field {
    /// The position is assigned when the field is placed into a [`RecordSchema`].
    pub fn new(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            name: name.into(),
            position: 0,
            schema,
            default: None,
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Copy of this field (name, doc, default) with a different type.
    pub fn with_schema(&self, schema: SchemaNode) -> Self {
        Self {
            name: self.name.clone(),
            position: self.position,
            schema,
            default: self.default.clone(),
            doc: self.doc.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    pub fn default_value(&self) -> Option<&serde_json::Value> {
        self.default.as_ref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

/// Types that carry their own record schema, such as generated record types.
pub trait HasSchema {
    fn schema() -> SchemaNode;
}
