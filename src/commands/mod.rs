//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `execute` module producing a serializable result
//! - An `output` module implementing `Outputable` for that result

pub mod describe;
pub mod dump;
pub mod generate;

pub use describe::DescribeCmd;
pub use dump::DumpCmd;
pub use generate::GenerateCmd;

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use tracing::info;

use crate::config::Settings;
use crate::db::{DbError, MetadataSource, Source, open_source};
use crate::grouping::group_by_table;
use crate::output::{OutputFormat, Outputable};
use crate::types::TableGroup;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>>;
}

fn validate_file_exists(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("File not found: {}", path.display()))
    }
}

/// Where settings and metadata come from. Shared by every command.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Settings file (.json, or a settings workbook .xlsx/.xlsm)
    #[arg(short, long, default_value = "settings.json")]
    pub settings: PathBuf,

    /// Read metadata from a JSON dump instead of connecting to the database
    #[arg(short, long, value_parser = validate_file_exists)]
    pub metadata: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the table definition workbook, one sheet per schema
    Generate(GenerateCmd),

    /// Print the tables and columns of each configured schema
    Describe(DescribeCmd),

    /// Save the metadata of each configured schema as a JSON dump
    Dump(DumpCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Generate(cmd) => {
                let result = cmd.execute()?;
                Ok(result.format(format))
            }
            Command::Describe(cmd) => {
                let result = cmd.execute()?;
                Ok(result.format(format))
            }
            Command::Dump(cmd) => {
                let result = cmd.execute()?;
                Ok(result.format(format))
            }
        }
    }
}

impl SourceArgs {
    /// Load settings and open the metadata source they describe.
    pub fn open(&self) -> Result<(Settings, Source), Box<dyn Error>> {
        let settings = Settings::load(&self.settings)?;
        info!(
            settings = %self.settings.display(),
            schemas = settings.schemas.len(),
            "loaded settings"
        );
        let source = open_source(&settings.connection, self.metadata.as_deref())?;
        Ok((settings, source))
    }
}

/// Fetch and group the tables of one schema.
pub fn fetch_groups(
    source: &mut impl MetadataSource,
    schema: &str,
) -> Result<Vec<TableGroup>, DbError> {
    let rows = source.fetch_columns(schema)?;
    Ok(group_by_table(rows))
}
