//! MySQL metadata source.
//!
//! `COLUMN_TYPE` and `COLUMN_KEY` come straight from `INFORMATION_SCHEMA`, so
//! types read like `int(11)` and key tags are the server's own `PRI`, `UNI`
//! and `MUL`.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{ConnectOptions, Row};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use super::{DbError, MetadataSource};
use crate::config::ConnectionSettings;
use crate::types::ColumnRow;

/// Column definitions of one schema, ordered by table name then ordinal.
///
/// Text columns are cast to `CHAR`: some servers report `INFORMATION_SCHEMA`
/// strings as binary.
pub const MYSQL_COLUMNS_QUERY: &str = "
SELECT CAST(t.TABLE_NAME AS CHAR) AS table_name,
       CAST(COALESCE(t.TABLE_COMMENT, '') AS CHAR) AS table_comment,
       CAST(c.COLUMN_NAME AS CHAR) AS column_name,
       CAST(c.ORDINAL_POSITION AS SIGNED) AS ordinal,
       CAST(c.COLUMN_TYPE AS CHAR) AS column_type,
       CAST(c.IS_NULLABLE AS CHAR) AS is_nullable,
       CAST(c.COLUMN_KEY AS CHAR) AS key_type,
       CAST(COALESCE(c.COLUMN_COMMENT, '') AS CHAR) AS comment
FROM INFORMATION_SCHEMA.TABLES t
JOIN INFORMATION_SCHEMA.COLUMNS c
  ON t.TABLE_SCHEMA = c.TABLE_SCHEMA AND t.TABLE_NAME = c.TABLE_NAME
WHERE t.TABLE_SCHEMA = ?
ORDER BY t.TABLE_NAME, c.ORDINAL_POSITION
";

/// Metadata source backed by one MySQL connection.
///
/// Owns a current-thread runtime and blocks on each query. The connection
/// must be dropped before the runtime, hence the field order.
pub struct MysqlSource {
    connection: MySqlConnection,
    runtime: Runtime,
}

impl MysqlSource {
    pub fn connect(settings: &ConnectionSettings) -> Result<Self, DbError> {
        let failed = |message: String| DbError::ConnectionFailed {
            system: settings.system.clone(),
            host: settings.host.clone(),
            port: settings.port,
            message,
        };

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| failed(e.to_string()))?;

        let mut options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password);
        if let Some(database) = &settings.database {
            options = options.database(database);
        }

        let connection = runtime
            .block_on(options.connect())
            .map_err(|e| failed(e.to_string()))?;

        info!(host = %settings.host, port = settings.port, user = %settings.user, "connected to MySQL");
        Ok(Self { connection, runtime })
    }
}

impl MetadataSource for MysqlSource {
    fn fetch_columns(&mut self, schema: &str) -> Result<Vec<ColumnRow>, DbError> {
        let query = sqlx::query(MYSQL_COLUMNS_QUERY)
            .bind(schema)
            .fetch_all(&mut self.connection);
        let rows = self
            .runtime
            .block_on(query)
            .map_err(|e| DbError::QueryFailed {
                schema: schema.to_string(),
                message: e.to_string(),
            })?;

        debug!(schema, rows = rows.len(), "fetched column metadata");
        rows.iter().map(|row| extract_column_row(schema, row)).collect()
    }

    fn backend_name(&self) -> &'static str {
        "MySQL"
    }
}

fn extract_column_row(schema: &str, row: &MySqlRow) -> Result<ColumnRow, DbError> {
    let invalid = |e: sqlx::Error| DbError::InvalidRow {
        schema: schema.to_string(),
        message: e.to_string(),
    };
    let is_nullable: String = row.try_get("is_nullable").map_err(invalid)?;

    Ok(ColumnRow {
        table_name: row.try_get("table_name").map_err(invalid)?,
        table_comment: row.try_get("table_comment").map_err(invalid)?,
        column_name: row.try_get("column_name").map_err(invalid)?,
        ordinal: row.try_get("ordinal").map_err(invalid)?,
        column_type: row.try_get("column_type").map_err(invalid)?,
        nullable: is_nullable_flag(&is_nullable),
        key_type: row.try_get("key_type").map_err(invalid)?,
        comment: row.try_get("comment").map_err(invalid)?,
    })
}

/// `IS_NULLABLE` holds `YES` for nullable columns and `NO` otherwise.
fn is_nullable_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("YES")
}
