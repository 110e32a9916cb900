//! Metadata sources for schema column definitions.
//!
//! This module provides the metadata abstraction used by every command:
//! - A live PostgreSQL or MySQL connection reading the information schema
//! - A JSON metadata dump, for offline runs and tests
//!
//! # Type Decisions
//!
//! **Why `i64` for ordinal positions?**
//! The catalog query casts ordinals to `int8`, and dumps store plain JSON
//! numbers. Keeping `i64` end to end avoids lossy conversions; the renderer
//! rejects values below 1 instead of coercing them.
//!
//! **Why `enum_dispatch` instead of `Box<dyn MetadataSource>`?**
//! The set of sources is closed and known at compile time, so [`Source`] is a
//! plain enum and calls are dispatched without a vtable.

mod dump;
mod mysql;
mod postgres;

use std::path::Path;

use enum_dispatch::enum_dispatch;
use thiserror::Error;
use tracing::info;

pub use self::dump::{DumpSource, MetadataDump, write_dump};
pub use self::mysql::{MYSQL_COLUMNS_QUERY, MysqlSource};
pub use self::postgres::{COLUMNS_QUERY, PostgresSource};

use crate::config::{ConnectionSettings, DatabaseSystem};
use crate::types::ColumnRow;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to connect to {system} at {host}:{port}: {message}")]
    ConnectionFailed {
        system: String,
        host: String,
        port: u16,
        message: String,
    },

    #[error("Metadata query failed for schema '{schema}': {message}")]
    QueryFailed { schema: String, message: String },

    #[error("Invalid metadata row in schema '{schema}': {message}")]
    InvalidRow { schema: String, message: String },

    #[error("Failed to read metadata dump '{path}': {message}")]
    DumpUnreadable { path: String, message: String },

    #[error("Failed to write metadata dump '{path}': {message}")]
    DumpUnwritable { path: String, message: String },
}

/// A provider of column definitions, one schema at a time.
#[enum_dispatch]
pub trait MetadataSource {
    /// Fetch every column of every table in `schema`, ordered by table name
    /// then ordinal position.
    fn fetch_columns(&mut self, schema: &str) -> Result<Vec<ColumnRow>, DbError>;

    /// Get the source name for logging.
    fn backend_name(&self) -> &'static str;
}

/// The metadata sources available to commands.
#[enum_dispatch(MetadataSource)]
pub enum Source {
    Postgres(PostgresSource),
    Mysql(MysqlSource),
    Dump(DumpSource),
}

/// Open the metadata source for a run.
///
/// A dump path takes precedence over the configured connection; otherwise a
/// single connection to the configured system is opened and reused for every
/// schema.
pub fn open_source(
    connection: &ConnectionSettings,
    dump: Option<&Path>,
) -> Result<Source, Box<dyn std::error::Error>> {
    let source: Source = match dump {
        Some(path) => DumpSource::open(path)?.into(),
        None => match connection.database_system()? {
            DatabaseSystem::Postgres => PostgresSource::connect(connection)?.into(),
            DatabaseSystem::Mysql => MysqlSource::connect(connection)?.into(),
        },
    };
    info!(backend = source.backend_name(), "metadata source ready");
    Ok(source)
}
