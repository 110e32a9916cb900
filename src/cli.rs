//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Format of the summary printed after the command runs
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Log debug detail to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Maximum log level selected by `--verbose` / `--quiet`.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_defaults() {
        let args = Args::try_parse_from(["schema_doc", "generate"]).unwrap();
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.log_level(), tracing::Level::INFO);
    }

    #[rstest]
    #[case("--verbose", tracing::Level::DEBUG)]
    #[case("-q", tracing::Level::ERROR)]
    fn test_log_level(#[case] flag: &str, #[case] expected: tracing::Level) {
        let args = Args::try_parse_from(["schema_doc", "generate", flag]).unwrap();
        assert_eq!(args.log_level(), expected);
    }

    #[rstest]
    fn test_verbose_conflicts_with_quiet() {
        let result = Args::try_parse_from(["schema_doc", "-v", "-q", "generate"]);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_global_format_after_subcommand() {
        let args = Args::try_parse_from(["schema_doc", "describe", "--format", "json"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[rstest]
    fn test_requires_subcommand() {
        assert!(Args::try_parse_from(["schema_doc"]).is_err());
    }
}
