//! Groups flat column rows into per-table groups.

use std::collections::BTreeMap;

use crate::types::{ColumnRow, TableGroup};

/// Groups column rows by table name.
///
/// Uses a BTreeMap keyed by table name, so groups come out in ascending name
/// order. The table comment is taken from the first row seen for each table;
/// later rows never replace it. Columns within a group are ordered by ordinal
/// position (stable, so equal ordinals keep their input order).
///
/// Every input row ends up in exactly one group, unchanged.
pub fn group_by_table(rows: Vec<ColumnRow>) -> Vec<TableGroup> {
    let mut table_map: BTreeMap<String, (String, Vec<ColumnRow>)> = BTreeMap::new();

    for row in rows {
        let entry = table_map
            .entry(row.table_name.clone())
            .or_insert_with(|| (row.table_comment.clone(), Vec::new()));
        entry.1.push(row);
    }

    table_map
        .into_iter()
        .map(|(name, (comment, mut columns))| {
            columns.sort_by_key(|c| c.ordinal);
            TableGroup {
                name,
                comment,
                columns,
            }
        })
        .collect()
}
