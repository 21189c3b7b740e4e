use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use nestcol::{core::SchemaNode, projection::project_schema};

/// Read a JSON schema file and optionally project it.
pub fn load_schema(path: &Path, project: &[String]) -> Result<SchemaNode> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let schema = SchemaNode::from_json_str(&text)
        .with_context(|| format!("invalid schema in {}", path.display()))?;
    if project.is_empty() {
        return Ok(schema);
    }
    tracing::debug!(paths = ?project, "projecting input schema");
    Ok(project_schema(&schema, project)?)
}

/// Write `text` to `output`, or to stdout when no path is given.
pub fn emit(output: Option<PathBuf>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(&path, format!("{text}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}
