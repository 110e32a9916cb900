mod execute;
mod output;
mod output_tests;

use std::path::PathBuf;

use clap::Args;

use super::SourceArgs;

pub use execute::DumpResult;

/// Save the metadata of each configured schema as a JSON dump
///
/// The dump can be passed back with `--metadata` to generate the workbook
/// without a database connection.
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schema_doc dump                          # settings.json -> metadata.json
  schema_doc dump -o snapshots/prod.json   # Custom output path")]
pub struct DumpCmd {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dump file to write
    #[arg(short, long, default_value = "metadata.json")]
    pub output: PathBuf,
}
