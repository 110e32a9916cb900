//! Grouped table types produced from flat column rows.

use serde::Serialize;

use super::ColumnRow;

/// All columns of one table, in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableGroup {
    pub name: String,
    /// Comment of the first row seen for this table.
    pub comment: String,
    pub columns: Vec<ColumnRow>,
}

/// Table and column counts for one rendered schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaSummary {
    pub schema: String,
    pub tables: usize,
    pub columns: usize,
}

impl SchemaSummary {
    pub fn from_groups(schema: &str, groups: &[TableGroup]) -> Self {
        Self {
            schema: schema.to_string(),
            tables: groups.len(),
            columns: groups.iter().map(|g| g.columns.len()).sum(),
        }
    }
}
