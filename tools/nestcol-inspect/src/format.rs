use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum SchemaFormat {
    /// Pretty-printed JSON schema
    Json,
    /// Indented outline of the schema tree
    Text,
}
