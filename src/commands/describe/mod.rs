mod cli_tests;
mod execute;
mod output;

use clap::Args;

use super::SourceArgs;

pub use execute::{DescribeResult, SchemaDescription};

/// Print the tables and columns of each configured schema
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schema_doc describe                     # Schemas from settings.json
  schema_doc describe --format json       # Full column metadata as JSON
  schema_doc describe -m metadata.json    # From a metadata dump")]
pub struct DescribeCmd {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only describe this schema (must be one of the configured schemas)
    #[arg(long)]
    pub schema: Option<String>,
}
