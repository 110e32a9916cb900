mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

use super::SourceArgs;

pub use execute::{GenerateResult, build_document};

/// Generate the table definition workbook, one sheet per schema
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schema_doc generate                                 # settings.json -> table_definitions.xlsx
  schema_doc generate -s settings.xlsx -o docs.xlsx   # Settings workbook, custom output
  schema_doc generate -m metadata.json                # From a metadata dump, no database")]
pub struct GenerateCmd {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Workbook to write
    #[arg(short, long, default_value = "table_definitions.xlsx")]
    pub output: PathBuf,
}
