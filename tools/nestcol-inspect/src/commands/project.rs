use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use nestcol::core::format_schema;

use crate::{
    format::SchemaFormat,
    input::{emit, load_schema},
};

#[derive(Args)]
pub struct ProjectArgs {
    /// Path to the JSON schema file
    input: PathBuf,

    /// Dotted leaf paths to keep, e.g. address.city
    #[arg(required = true)]
    paths: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = SchemaFormat::Json)]
    format: SchemaFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn run(self) -> Result<()> {
        let projected = load_schema(&self.input, &self.paths)?;
        let text = match self.format {
            SchemaFormat::Json => serde_json::to_string_pretty(&projected.to_json())?,
            SchemaFormat::Text => format_schema(&projected)?,
        };
        emit(self.output, &text)
    }
}
