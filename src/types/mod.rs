//! Shared types for schema metadata.

mod column;
mod table;

pub use column::{ColumnRow, KEY_MULTIPLE, KEY_PRIMARY};
pub use table::{SchemaSummary, TableGroup};
