//! PostgreSQL metadata source.
//!
//! Reads column definitions from `information_schema`, with comments, rendered
//! types and index membership taken from `pg_catalog`.

use postgres::{Client, Config, NoTls, Row};
use tracing::{debug, info};

use super::{DbError, MetadataSource};
use crate::config::ConnectionSettings;
use crate::types::ColumnRow;

/// Column definitions of one schema, ordered by table name then ordinal.
///
/// The key tag follows the catalog convention the renderer expects: `PRI` for
/// primary-key members, `UNI` for the leading column of a unique index, `MUL`
/// for the leading column of any other index, empty otherwise.
pub const COLUMNS_QUERY: &str = "
SELECT c.table_name::text AS table_name,
       COALESCE(obj_description(cls.oid, 'pg_class'), '') AS table_comment,
       c.column_name::text AS column_name,
       c.ordinal_position::int8 AS ordinal,
       format_type(att.atttypid, att.atttypmod) AS column_type,
       c.is_nullable = 'YES' AS nullable,
       CASE
           WHEN EXISTS (SELECT 1 FROM pg_catalog.pg_index i
                        WHERE i.indrelid = cls.oid AND i.indisprimary
                          AND att.attnum = ANY (i.indkey)) THEN 'PRI'
           WHEN EXISTS (SELECT 1 FROM pg_catalog.pg_index i
                        WHERE i.indrelid = cls.oid AND i.indisunique
                          AND i.indkey[0] = att.attnum) THEN 'UNI'
           WHEN EXISTS (SELECT 1 FROM pg_catalog.pg_index i
                        WHERE i.indrelid = cls.oid
                          AND i.indkey[0] = att.attnum) THEN 'MUL'
           ELSE ''
       END AS key_type,
       COALESCE(col_description(cls.oid, att.attnum), '') AS comment
FROM information_schema.tables t
JOIN information_schema.columns c
  ON t.table_schema = c.table_schema AND t.table_name = c.table_name
JOIN pg_catalog.pg_namespace ns ON ns.nspname = c.table_schema
JOIN pg_catalog.pg_class cls ON cls.relnamespace = ns.oid AND cls.relname = c.table_name
JOIN pg_catalog.pg_attribute att ON att.attrelid = cls.oid AND att.attname = c.column_name
WHERE t.table_schema = $1
ORDER BY t.table_name, c.ordinal_position
";

/// Metadata source backed by one PostgreSQL connection.
///
/// The connection is opened once and reused for every schema; it is closed
/// when the source is dropped.
pub struct PostgresSource {
    client: Client,
}

impl PostgresSource {
    /// Connect with the configured host, port and credentials.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionFailed` if the server cannot be reached or
    /// rejects the credentials.
    pub fn connect(settings: &ConnectionSettings) -> Result<Self, DbError> {
        let mut config = Config::new();
        config
            .host(&settings.host)
            .port(settings.port)
            .user(&settings.user)
            .password(&settings.password)
            .application_name("schema_doc");
        if let Some(database) = &settings.database {
            config.dbname(database);
        }

        let client = config.connect(NoTls).map_err(|e| DbError::ConnectionFailed {
            system: settings.system.clone(),
            host: settings.host.clone(),
            port: settings.port,
            message: e.to_string(),
        })?;

        info!(host = %settings.host, port = settings.port, user = %settings.user, "connected to PostgreSQL");
        Ok(Self { client })
    }
}

impl MetadataSource for PostgresSource {
    fn fetch_columns(&mut self, schema: &str) -> Result<Vec<ColumnRow>, DbError> {
        let rows = self
            .client
            .query(COLUMNS_QUERY, &[&schema])
            .map_err(|e| DbError::QueryFailed {
                schema: schema.to_string(),
                message: e.to_string(),
            })?;

        debug!(schema, rows = rows.len(), "fetched column metadata");
        rows.iter().map(|row| extract_column_row(schema, row)).collect()
    }

    fn backend_name(&self) -> &'static str {
        "PostgreSQL"
    }
}

fn extract_column_row(schema: &str, row: &Row) -> Result<ColumnRow, DbError> {
    let invalid = |e: postgres::Error| DbError::InvalidRow {
        schema: schema.to_string(),
        message: e.to_string(),
    };

    Ok(ColumnRow {
        table_name: row.try_get("table_name").map_err(invalid)?,
        table_comment: row.try_get("table_comment").map_err(invalid)?,
        column_name: row.try_get("column_name").map_err(invalid)?,
        ordinal: row.try_get("ordinal").map_err(invalid)?,
        column_type: row.try_get("column_type").map_err(invalid)?,
        nullable: row.try_get("nullable").map_err(invalid)?,
        key_type: row.try_get("key_type").map_err(invalid)?,
        comment: row.try_get("comment").map_err(invalid)?,
    })
}
