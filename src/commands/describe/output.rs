//! Output formatting for describe command results.

use super::execute::{DescribeResult, SchemaDescription};
use crate::output::Outputable;
use crate::types::{ColumnRow, TableGroup};

impl Outputable for DescribeResult {
    fn to_table(&self) -> String {
        if self.schemas.is_empty() {
            return "No schemas configured.".to_string();
        }
        self.schemas
            .iter()
            .map(format_schema)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn format_schema(description: &SchemaDescription) -> String {
    let mut lines = vec![format!(
        "Schema: {} ({} table(s))",
        description.schema,
        description.tables.len()
    )];

    if description.tables.is_empty() {
        lines.push("  No tables found.".to_string());
        return lines.join("\n");
    }

    for table in &description.tables {
        lines.push(String::new());
        lines.push(format_table_heading(table));
        lines.extend(table.columns.iter().map(format_column));
    }
    lines.join("\n")
}

fn format_table_heading(table: &TableGroup) -> String {
    if table.comment.is_empty() {
        format!("{}:", table.name)
    } else {
        format!("{}: {}", table.name, table.comment)
    }
}

fn format_column(column: &ColumnRow) -> String {
    let mut line = format!("  {}. {} {}", column.ordinal, column.column_name, column.column_type);
    if !column.nullable {
        line.push_str(" NOT NULL");
    }
    if !column.key_type.is_empty() {
        line.push_str(&format!(" [{}]", column.key_type));
    }
    if !column.comment.is_empty() {
        line.push_str(&format!(" ({})", column.comment));
    }
    line
}
