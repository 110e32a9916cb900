//! JSON metadata dumps.
//!
//! A dump is a JSON object mapping schema names to their column rows, in the
//! same order the catalog query returns them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::{DbError, MetadataSource};
use crate::types::ColumnRow;

pub type MetadataDump = BTreeMap<String, Vec<ColumnRow>>;

/// Metadata source reading from a dump file loaded up front.
#[derive(Debug)]
pub struct DumpSource {
    schemas: MetadataDump,
}

impl DumpSource {
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let unreadable = |message: String| DbError::DumpUnreadable {
            path: path.display().to_string(),
            message,
        };
        let content = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        let schemas = serde_json::from_str(&content).map_err(|e| unreadable(e.to_string()))?;
        Ok(Self { schemas })
    }

    pub fn from_schemas(schemas: MetadataDump) -> Self {
        Self { schemas }
    }
}

impl MetadataSource for DumpSource {
    /// A schema missing from the dump fails the same way a missing schema
    /// fails against a live catalog query.
    fn fetch_columns(&mut self, schema: &str) -> Result<Vec<ColumnRow>, DbError> {
        let rows = self
            .schemas
            .get(schema)
            .cloned()
            .ok_or_else(|| DbError::QueryFailed {
                schema: schema.to_string(),
                message: "schema not present in metadata dump".to_string(),
            })?;
        debug!(schema, rows = rows.len(), "read column metadata from dump");
        Ok(rows)
    }

    fn backend_name(&self) -> &'static str {
        "Dump"
    }
}

/// Write a dump file.
pub fn write_dump(path: &Path, dump: &MetadataDump) -> Result<(), DbError> {
    let unwritable = |message: String| DbError::DumpUnwritable {
        path: path.display().to_string(),
        message,
    };
    let content = serde_json::to_string_pretty(dump).map_err(|e| unwritable(e.to_string()))?;
    fs::write(path, content).map_err(|e| unwritable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use rstest::{fixture, rstest};
    use tempfile::{TempDir, tempdir};

    #[fixture]
    fn dump_file() -> (TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        fs::write(&path, fixtures::SHOP_DUMP).unwrap();
        (dir, path)
    }

    #[rstest]
    fn test_fetch_known_schema(dump_file: (TempDir, std::path::PathBuf)) {
        let (_dir, path) = dump_file;
        let mut source = DumpSource::open(&path).unwrap();

        let rows = source.fetch_columns("shop").unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].table_name, "customers");
        assert!(source.fetch_columns("audit").unwrap().is_empty());
    }

    #[rstest]
    fn test_fetch_unknown_schema_fails(dump_file: (TempDir, std::path::PathBuf)) {
        let (_dir, path) = dump_file;
        let mut source = DumpSource::open(&path).unwrap();

        let err = source.fetch_columns("billing").unwrap_err();
        assert!(matches!(err, DbError::QueryFailed { ref schema, .. } if schema == "billing"));
    }

    #[rstest]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let err = DumpSource::open(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DbError::DumpUnreadable { .. }));
    }

    #[rstest]
    fn test_open_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        fs::write(&path, r#"{ "shop": [ { "table_name": 3 } ] }"#).unwrap();
        assert!(matches!(DumpSource::open(&path), Err(DbError::DumpUnreadable { .. })));
    }

    #[rstest]
    fn test_write_then_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_dump(&path, &fixtures::shop_dump()).unwrap();

        let mut source = DumpSource::open(&path).unwrap();
        assert_eq!(source.fetch_columns("shop").unwrap(), fixtures::shop_rows());
    }
}
