//! Core type for one column definition read from the metadata catalog.

use serde::{Deserialize, Serialize};

/// Key tag the catalog reports for primary-key columns.
pub const KEY_PRIMARY: &str = "PRI";

/// Key tag the catalog reports for the leading column of a non-unique index.
pub const KEY_MULTIPLE: &str = "MUL";

/// One column of one table, as returned by the metadata source.
///
/// Rows are immutable once fetched. The table name and comment are repeated on
/// every row of the same table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub table_name: String,
    #[serde(default)]
    pub table_comment: String,
    pub column_name: String,
    /// 1-based declared position within the table.
    pub ordinal: i64,
    pub column_type: String,
    pub nullable: bool,
    /// `PRI`, `MUL`, or any other tag (usually empty).
    #[serde(default)]
    pub key_type: String,
    #[serde(default)]
    pub comment: String,
}

impl ColumnRow {
    pub fn is_primary_key(&self) -> bool {
        self.key_type == KEY_PRIMARY
    }

    pub fn is_indexed(&self) -> bool {
        self.key_type == KEY_MULTIPLE
    }

    /// Display value for the "Not Null" column: `YES` when the column rejects NULL.
    pub fn not_null_label(&self) -> &'static str {
        if self.nullable { "NO" } else { "YES" }
    }
}
