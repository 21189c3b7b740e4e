//! Column-I/O tree: the mapping from a nested schema to primitive columns.
//!
//! # Levels
//!
//! Starting from `r = 0, d = 0` at the root record:
//!
//! - a nullable union adds one definition level to the node it wraps;
//! - an array element and a map value add one repetition level and one
//!   definition level;
//! - a record field inherits the levels of its record.
//!
//! A nullable array element therefore takes both increments. Unions of any
//! other shape are rejected.
//!
//! # First and last columns
//!
//! For a leaf and a depth `r`, the group that owns depth `r` is the outermost
//! node on the leaf's path whose repetition level is `r`: the root for
//! `r = 0`, otherwise the repeated node that introduced that depth. Its
//! leftmost leaf is the column a reader consults to detect that a new group
//! opened at depth `r`; its rightmost leaf closes the group.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`].

use std::ops::Range;

use nestcol_core::{PrimitiveKind, SchemaNode};

use crate::{
    descriptor::ColumnDescriptor,
    error::ColumnError,
    store::ColumnStore,
};

/// Index of a node inside its [`ColumnIo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The schema construct a group node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupShape {
    Record,
    /// Single child: the repeated element, named `array`.
    Array,
    /// Single child: the repeated value, named `value`.
    Map,
}

impl GroupShape {
    pub fn name(&self) -> &'static str {
        match self {
            GroupShape::Record => "record",
            GroupShape::Array => "array",
            GroupShape::Map => "map",
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Group {
        shape: GroupShape,
        children: Vec<NodeId>,
    },
    Leaf {
        descriptor: ColumnDescriptor,
        /// Position of the leaf among all leaves, in declaration order.
        column_index: usize,
    },
}

/// One node of a [`ColumnIo`] tree.
#[derive(Debug, Clone)]
pub struct ColumnNode {
    id: NodeId,
    parent: Option<NodeId>,
    name: String,
    schema: SchemaNode,
    repetition_level: u32,
    definition_level: u32,
    repeated: bool,
    optional: bool,
    field_path: Vec<String>,
    field_index_path: Vec<usize>,
    leaf_range: Range<usize>,
    kind: NodeKind,
}

impl ColumnNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Field name, `array`/`value` for synthetic children, the record name
    /// for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema this node stands for. For a nullable field this is the
    /// non-null branch; the union is reflected by [`is_optional`](Self::is_optional).
    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    pub fn repetition_level(&self) -> u32 {
        self.repetition_level
    }

    pub fn definition_level(&self) -> u32 {
        self.definition_level
    }

    /// True for array elements and map values.
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// True for the non-null branch of a nullable union.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn field_path(&self) -> &[String] {
        &self.field_path
    }

    pub fn dotted_path(&self) -> String {
        self.field_path.join(".")
    }

    pub fn field_index_path(&self) -> &[usize] {
        &self.field_index_path
    }

    /// Column indices of the leaves below this node (itself for a leaf).
    pub fn leaf_range(&self) -> Range<usize> {
        self.leaf_range.clone()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Group { children, .. } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    pub fn descriptor(&self) -> Option<&ColumnDescriptor> {
        match &self.kind {
            NodeKind::Leaf { descriptor, .. } => Some(descriptor),
            NodeKind::Group { .. } => None,
        }
    }

    pub fn column_index(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::Leaf { column_index, .. } => Some(*column_index),
            NodeKind::Group { .. } => None,
        }
    }
}

/// Immutable column tree built from one record schema.
#[derive(Debug, Clone)]
pub struct ColumnIo {
    schema: SchemaNode,
    nodes: Vec<ColumnNode>,
    leaves: Vec<NodeId>,
}

impl ColumnIo {
    /// Build the column tree for `schema`, which must be a record.
    pub fn build(schema: &SchemaNode) -> Result<Self, ColumnError> {
        let SchemaNode::Record(record) = schema else {
            return Err(ColumnError::NonRecordRoot {
                schema: Box::new(schema.clone()),
            });
        };

        let mut builder = TreeBuilder::default();
        builder.visit(
            Slot {
                parent: None,
                name: record.name().to_string(),
                field_path: Vec::new(),
                field_index_path: Vec::new(),
                repetition_level: 0,
                definition_level: 0,
                repeated: false,
            },
            schema,
        )?;

        let io = Self {
            schema: schema.clone(),
            nodes: builder.nodes,
            leaves: builder.leaves,
        };
        tracing::debug!(
            record = %record.full_name(),
            nodes = io.nodes.len(),
            columns = io.leaves.len(),
            max_repetition_level = io.max_repetition_level(),
            max_definition_level = io.max_definition_level(),
            "built column tree"
        );
        Ok(io)
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    pub fn root(&self) -> &ColumnNode {
        &self.nodes[0]
    }

    /// Look up a node. `id` must come from this tree.
    pub fn node(&self, id: NodeId) -> &ColumnNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[ColumnNode] {
        &self.nodes
    }

    /// Leaves in declaration order; the n-th leaf has column index n.
    pub fn leaves(&self) -> impl ExactSizeIterator<Item = &ColumnNode> + '_ {
        self.leaves.iter().map(|id| self.node(*id))
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn leaf(&self, column_index: usize) -> Option<&ColumnNode> {
        self.leaves.get(column_index).map(|id| self.node(*id))
    }

    /// Find the leaf whose field path equals `path`.
    pub fn leaf_by_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&ColumnNode> {
        self.leaves().find(|leaf| {
            leaf.field_path.len() == path.len()
                && leaf.field_path.iter().zip(path).all(|(a, b)| a == b.as_ref())
        })
    }

    /// Field paths of all columns, in declaration order.
    pub fn column_paths(&self) -> Vec<Vec<String>> {
        self.leaves().map(|leaf| leaf.field_path.clone()).collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ColumnDescriptor> + '_ {
        self.leaves().filter_map(ColumnNode::descriptor)
    }

    pub fn max_repetition_level(&self) -> u32 {
        self.leaves().map(ColumnNode::repetition_level).max().unwrap_or(0)
    }

    pub fn max_definition_level(&self) -> u32 {
        self.leaves().map(ColumnNode::definition_level).max().unwrap_or(0)
    }

    /// Nodes from the root down to the parent of `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            out.push(parent);
            current = self.node(parent).parent;
        }
        out.reverse();
        out
    }

    /// Leftmost leaf below `id`, `None` for a group without leaves.
    pub fn first_leaf(&self, id: NodeId) -> Option<NodeId> {
        let range = self.node(id).leaf_range();
        self.leaves.get(range.start).copied().filter(|_| !range.is_empty())
    }

    /// Rightmost leaf below `id`, `None` for a group without leaves.
    pub fn last_leaf(&self, id: NodeId) -> Option<NodeId> {
        let range = self.node(id).leaf_range();
        if range.is_empty() {
            return None;
        }
        self.leaves.get(range.end - 1).copied()
    }

    /// The node owning repetition depth `r` on the path of `leaf`.
    pub fn parent_at(&self, leaf: NodeId, r: u32) -> Result<NodeId, ColumnError> {
        let node = self.leaf_node(leaf)?;
        if r > node.repetition_level {
            return Err(ColumnError::InvalidRepetitionDepth {
                path: node.dotted_path(),
                depth: r,
                max: node.repetition_level,
            });
        }
        self.ancestors(leaf)
            .into_iter()
            .chain(std::iter::once(leaf))
            .find(|id| self.node(*id).repetition_level == r)
            .ok_or_else(|| ColumnError::InvalidRepetitionDepth {
                path: node.dotted_path(),
                depth: r,
                max: node.repetition_level,
            })
    }

    /// The leftmost column of the group owning depth `r` above `leaf`.
    pub fn first(&self, leaf: NodeId, r: u32) -> Result<NodeId, ColumnError> {
        let owner = self.parent_at(leaf, r)?;
        Ok(self.first_leaf(owner).unwrap_or(leaf))
    }

    /// The rightmost column of the group owning depth `r` above `leaf`.
    pub fn last(&self, leaf: NodeId, r: u32) -> Result<NodeId, ColumnError> {
        let owner = self.parent_at(leaf, r)?;
        Ok(self.last_leaf(owner).unwrap_or(leaf))
    }

    /// Whether `leaf` is the column that signals a new group at depth `r`.
    pub fn is_first(&self, leaf: NodeId, r: u32) -> Result<bool, ColumnError> {
        Ok(self.first(leaf, r)? == leaf)
    }

    /// Whether `leaf` is the last column of its group at depth `r`.
    pub fn is_last(&self, leaf: NodeId, r: u32) -> Result<bool, ColumnError> {
        Ok(self.last(leaf, r)? == leaf)
    }

    /// Ask `store` for the writer of `leaf`'s column.
    pub fn column_writer<S: ColumnStore>(
        &self,
        leaf: NodeId,
        store: &S,
    ) -> Result<S::Writer, ColumnError> {
        store.column_writer(self.leaf_descriptor(leaf)?)
    }

    /// Ask `store` for the reader of `leaf`'s column.
    pub fn column_reader<S: ColumnStore>(
        &self,
        leaf: NodeId,
        store: &S,
    ) -> Result<S::Reader, ColumnError> {
        store.column_reader(self.leaf_descriptor(leaf)?)
    }

    fn leaf_node(&self, id: NodeId) -> Result<&ColumnNode, ColumnError> {
        let node = self.node(id);
        if node.is_leaf() {
            Ok(node)
        } else {
            Err(ColumnError::NotALeaf {
                path: node.dotted_path(),
            })
        }
    }

    fn leaf_descriptor(&self, id: NodeId) -> Result<&ColumnDescriptor, ColumnError> {
        let node = self.node(id);
        node.descriptor().ok_or_else(|| ColumnError::NotALeaf {
            path: node.dotted_path(),
        })
    }
}

/// Where a node is attached and the levels it inherits.
struct Slot {
    parent: Option<NodeId>,
    name: String,
    field_path: Vec<String>,
    field_index_path: Vec<usize>,
    repetition_level: u32,
    definition_level: u32,
    repeated: bool,
}

impl Slot {
    fn child(&self, parent: NodeId, name: &str, index: usize, repeated: bool) -> Slot {
        let mut field_path = self.field_path.clone();
        field_path.push(name.to_string());
        let mut field_index_path = self.field_index_path.clone();
        field_index_path.push(index);
        Slot {
            parent: Some(parent),
            name: name.to_string(),
            field_path,
            field_index_path,
            repetition_level: self.repetition_level + u32::from(repeated),
            definition_level: self.definition_level + u32::from(repeated),
            repeated,
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    nodes: Vec<ColumnNode>,
    leaves: Vec<NodeId>,
}

impl TreeBuilder {
    fn visit(&mut self, mut slot: Slot, schema: &SchemaNode) -> Result<NodeId, ColumnError> {
        let (schema, optional) = match schema {
            SchemaNode::Union(_) => (unwrap_nullable(&slot, schema)?, true),
            other => (other, false),
        };
        if optional {
            slot.definition_level += 1;
        }

        let id = NodeId(self.nodes.len());
        let first_column = self.leaves.len();
        self.nodes.push(ColumnNode {
            id,
            parent: slot.parent,
            name: slot.name.clone(),
            schema: schema.clone(),
            repetition_level: slot.repetition_level,
            definition_level: slot.definition_level,
            repeated: slot.repeated,
            optional,
            field_path: slot.field_path.clone(),
            field_index_path: slot.field_index_path.clone(),
            leaf_range: first_column..first_column,
            kind: NodeKind::Group {
                shape: GroupShape::Record,
                children: Vec::new(),
            },
        });

        let kind = match schema {
            SchemaNode::Primitive(kind) => self.leaf(id, &slot, *kind),
            SchemaNode::Record(record) => {
                let mut children = Vec::with_capacity(record.fields().len());
                for field in record.fields() {
                    let child = slot.child(id, field.name(), field.position(), false);
                    children.push(self.visit(child, field.schema())?);
                }
                NodeKind::Group {
                    shape: GroupShape::Record,
                    children,
                }
            }
            SchemaNode::Array(element) => {
                let child = self.visit(slot.child(id, "array", 0, true), element)?;
                NodeKind::Group {
                    shape: GroupShape::Array,
                    children: vec![child],
                }
            }
            SchemaNode::Map(value) => {
                let child = self.visit(slot.child(id, "value", 0, true), value)?;
                NodeKind::Group {
                    shape: GroupShape::Map,
                    children: vec![child],
                }
            }
            SchemaNode::Union(_) => {
                return Err(ColumnError::UnsupportedSchemaShape {
                    path: slot.field_path.join("."),
                    reason: "nested union",
                    schema: Box::new(schema.clone()),
                });
            }
        };

        let node = &mut self.nodes[id.0];
        node.kind = kind;
        node.leaf_range = first_column..self.leaves.len();
        Ok(id)
    }

    fn leaf(&mut self, id: NodeId, slot: &Slot, primitive: PrimitiveKind) -> NodeKind {
        let column_index = self.leaves.len();
        self.leaves.push(id);
        let descriptor = ColumnDescriptor::new(
            slot.field_path.clone(),
            primitive,
            slot.repetition_level,
            slot.definition_level,
        );
        tracing::trace!(column = %descriptor, column_index, "column");
        NodeKind::Leaf {
            descriptor,
            column_index,
        }
    }
}

fn unwrap_nullable<'s>(slot: &Slot, schema: &'s SchemaNode) -> Result<&'s SchemaNode, ColumnError> {
    match schema.nullable_branch() {
        Some(SchemaNode::Union(_)) => Err(ColumnError::UnsupportedSchemaShape {
            path: slot.field_path.join("."),
            reason: "nested union",
            schema: Box::new(schema.clone()),
        }),
        Some(inner) => Ok(inner),
        None => Err(ColumnError::UnsupportedSchemaShape {
            path: slot.field_path.join("."),
            reason: "only two-branch unions with a null branch are supported",
            schema: Box::new(schema.clone()),
        }),
    }
}
