use nestcol_core::{Field, HasSchema, RecordSchema, SchemaNode};

use crate::{error::ProjectionError, path_tree::PathTree};

/// Project `schema` down to the leaves named by `paths`.
///
/// Each path is a dot-separated list of field names starting at the root
/// record, e.g. `"address.city"`. Arrays, maps and nullable unions on the
/// way are traversed without consuming a segment. Path order does not
/// matter and duplicate paths are merged; when both `"a"` and `"a.b"` are
/// requested, `a` is narrowed to `b`.
///
/// Projected records keep the name, namespace, doc and error flag of their
/// source and list the selected fields in source order. Fields requested as
/// leaves are copied unchanged, including their full type.
///
/// # Errors
///
/// - [`ProjectionError::EmptyProjectionRequest`] if `paths` is empty.
/// - [`ProjectionError::NonRecordRoot`] if `schema` is not a record.
/// - [`ProjectionError::UnknownFieldPath`] if a segment names a missing field.
/// - [`ProjectionError::UnsupportedProjection`] if a path continues below a
///   primitive or a non-nullable union.
pub fn project_schema<I, S>(schema: &SchemaNode, paths: I) -> Result<SchemaNode, ProjectionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tree = PathTree::from_paths(paths);
    if tree.is_leaf() {
        return Err(ProjectionError::EmptyProjectionRequest);
    }
    let SchemaNode::Record(record) = schema else {
        return Err(ProjectionError::NonRecordRoot {
            schema: Box::new(schema.clone()),
        });
    };

    let projected = project_record(record, &tree, "")?;
    tracing::debug!(
        record = %record.full_name(),
        requested_leaves = tree.leaf_count(),
        projected_leaves = projected.leaf_paths().len(),
        "projected schema"
    );
    Ok(projected)
}

/// Project the schema supplied by `T`.
pub fn project_type<T, I, S>(paths: I) -> Result<SchemaNode, ProjectionError>
where
    T: HasSchema,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    project_schema(&T::schema(), paths)
}

fn project_node(
    schema: &SchemaNode,
    tree: &PathTree,
    path: &str,
) -> Result<SchemaNode, ProjectionError> {
    if let Some(inner) = schema.nullable_branch() {
        let projected = project_node(inner, tree, path)?;
        return Ok(rewrap_nullable(schema, projected));
    }

    match schema {
        SchemaNode::Array(element) => Ok(SchemaNode::array(project_node(element, tree, path)?)),
        SchemaNode::Map(value) => Ok(SchemaNode::map(project_node(value, tree, path)?)),
        SchemaNode::Record(record) => project_record(record, tree, path),
        SchemaNode::Primitive(_) | SchemaNode::Union(_) => {
            Err(ProjectionError::UnsupportedProjection {
                path: path.to_string(),
                schema: Box::new(schema.clone()),
            })
        }
    }
}

fn project_record(
    record: &RecordSchema,
    tree: &PathTree,
    path: &str,
) -> Result<SchemaNode, ProjectionError> {
    let mut selected: Vec<(&Field, &PathTree)> = Vec::with_capacity(tree.child_count());
    for (name, subtree) in tree.children() {
        let field = record
            .field(name)
            .ok_or_else(|| ProjectionError::UnknownFieldPath {
                field: name.to_string(),
                record: record.full_name(),
                path: join_path(path, name),
            })?;
        selected.push((field, subtree));
    }
    selected.sort_by_key(|(field, _)| field.position());

    let mut fields = Vec::with_capacity(selected.len());
    for (field, subtree) in selected {
        if subtree.is_leaf() {
            fields.push(field.clone());
        } else {
            let child_path = join_path(path, field.name());
            let narrowed = project_node(field.schema(), subtree, &child_path)?;
            fields.push(field.with_schema(narrowed));
        }
    }

    Ok(SchemaNode::Record(record.with_fields(fields)?))
}

/// Wrap `projected` in a nullable union, keeping the null branch where the
/// source union had it.
fn rewrap_nullable(source: &SchemaNode, projected: SchemaNode) -> SchemaNode {
    match source {
        SchemaNode::Union(branches) if branches.first().is_some_and(SchemaNode::is_null) => {
            SchemaNode::nullable(projected)
        }
        _ => SchemaNode::Union(vec![projected, SchemaNode::null()]),
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
