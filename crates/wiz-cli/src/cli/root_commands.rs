use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate a whole document against a source schema.
    Validate(ValidateArgs),
    /// Validate a single field value.
    Field(FieldArgs),
    /// Flatten a nested error tree into path keys.
    Flatten(FlattenArgs),
    /// List registered data sources and their top-level fields.
    Sources,
    /// Print a source schema (JSON Schema or blank document) or a result shape.
    Schema(SchemaArgs),
}

/// Arguments for `wiz validate`.
#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Data source identifier (primary, secondary, tertiary).
    #[arg(short, long)]
    pub source: String,
    /// JSON document to validate (`-` reads stdin).
    pub file: PathBuf,
}

/// Arguments for `wiz field`.
#[derive(Clone, Debug, Args)]
pub struct FieldArgs {
    /// Data source identifier.
    #[arg(short, long)]
    pub source: String,
    /// Field path, e.g. `categoryGroups[0].cpc` or `bidding.amount`.
    #[arg(long)]
    pub path: String,
    /// Field value as JSON; anything that is not JSON is taken as a string.
    /// Omit to validate an absent field.
    #[arg(long)]
    pub value: Option<String>,
    /// Surrounding document, used for conditional sibling fields.
    #[arg(long)]
    pub document: Option<PathBuf>,
}

/// Arguments for `wiz flatten`.
#[derive(Clone, Debug, Args)]
pub struct FlattenArgs {
    /// JSON error tree (`-` reads stdin).
    pub file: PathBuf,
    /// Path prefix for every key.
    #[arg(long, default_value = "")]
    pub prefix: String,
}

/// Result shapes that `wiz schema --response` can print.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ResponseKind {
    Document,
    Field,
}

/// Arguments for `wiz schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Data source whose schema to print.
    #[arg(required_unless_present = "response")]
    pub source: Option<String>,
    /// Print the JSON Schema of a validation result instead.
    #[arg(long, value_enum, conflicts_with = "source")]
    pub response: Option<ResponseKind>,
    /// Print the blank starting document instead of the JSON Schema.
    #[arg(long, requires = "source")]
    pub skeleton: bool,
}
