mod commands;
mod format;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{arrow::ArrowArgs, columns::ColumnsArgs, project::ProjectArgs};

#[derive(Parser)]
#[command(
    name = "nestcol-inspect",
    about = "Inspect nested record schemas and their column layout"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a schema down to the given leaf paths
    Project(ProjectArgs),
    /// List the columns of a schema with their levels
    Columns(ColumnsArgs),
    /// Print the Arrow schema of a (projected) schema
    Arrow(ArrowArgs),
}

fn main() -> Result<()> {
    // RUST_LOG controls verbosity, e.g. RUST_LOG=nestcol_column=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Project(args) => args.run(),
        Commands::Columns(args) => args.run(),
        Commands::Arrow(args) => args.run(),
    }
}
