use std::{fmt::Write, path::PathBuf};

use anyhow::Result;
use clap::Args;
use nestcol::arrow::schema_to_arrow;

use crate::input::{emit, load_schema};

#[derive(Args)]
pub struct ArrowArgs {
    /// Path to the JSON schema file
    input: PathBuf,

    /// Project to these dotted leaf paths first
    #[arg(short, long, num_args = 1..)]
    project: Vec<String>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ArrowArgs {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(&self.input, &self.project)?;
        let arrow_schema = schema_to_arrow(&schema)?;

        let mut text = String::new();
        for field in arrow_schema.fields() {
            let nullable = if field.is_nullable() { " (nullable)" } else { "" };
            writeln!(text, "{}: {}{nullable}", field.name(), field.data_type())?;
        }
        emit(self.output, text.trim_end())
    }
}
