//! Layout of grouped schema metadata onto sheets.
//!
//! Each table becomes one block (see [`block`]); blocks are stacked down the
//! sheet with one blank row between them, and column widths are sized once
//! every block is in place.
//!
//! # Type Decisions
//!
//! **Why an in-memory `Sheet` instead of writing straight to the workbook?**
//! Border composition reads the border a cell already has before adding thick
//! edges. Keeping the document in memory makes that a pure value transform and
//! lets tests inspect every cell, merge and width without opening a file.
//!
//! **Why fold over blocks instead of a shared row counter?**
//! `render_block` takes the top row and returns the rows it used, so the next
//! start row is always derived from the previous block's extent.

pub mod block;
pub mod sheet;
pub mod sizing;
pub mod style;

use thiserror::Error;
use tracing::debug;

use crate::types::TableGroup;

pub use block::{BlockExtent, render_block};
pub use sheet::{
    Cell, CellRef, CellValue, DEFAULT_SHEET_NAME, Document, MAX_SHEET_NAME_CHARS, MergeRange, Sheet,
    SheetNameError, check_sheet_name, same_sheet_name,
};
pub use sizing::apply_column_widths;
pub use style::{Border, CellStyle, Color, Labels, Line, Palette};

/// Layout error types
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Column '{column}' of table '{table}' has invalid ordinal position {ordinal}")]
    InvalidOrdinal {
        table: String,
        column: String,
        ordinal: i64,
    },

    #[error("Sheet '{name}' already exists in the document")]
    DuplicateSheet { name: String },
}

/// Everything a block needs besides the table itself.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub palette: Palette,
    pub labels: Labels,
    /// Value written into every block's "created" cell.
    pub created_at: String,
}

impl RenderContext {
    pub fn new(palette: Palette, labels: Labels, created_at: impl Into<String>) -> Self {
        Self {
            palette,
            labels,
            created_at: created_at.into(),
        }
    }
}

/// Current local time in the format used for the "created" cell.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Render every table group of one schema onto a new sheet named after the schema.
pub fn render_sheet(
    schema: &str,
    groups: &[TableGroup],
    ctx: &RenderContext,
) -> Result<Sheet, RenderError> {
    let mut sheet = Sheet::new(schema);

    let next_row = groups.iter().try_fold(1, |top_row, group| {
        render_block(&mut sheet, schema, group, ctx, top_row).map(|extent| {
            debug!(table = %group.name, first_row = extent.first_row, last_row = extent.last_row, "rendered table block");
            extent.next_block_row()
        })
    })?;

    apply_column_widths(&mut sheet);
    debug!(schema, blocks = groups.len(), rows = next_row.saturating_sub(2), "rendered sheet");
    Ok(sheet)
}

#[cfg(test)]
pub(crate) fn test_context() -> RenderContext {
    RenderContext::new(
        Palette {
            main: Color::rgb(0xBDD7EE),
            sub: Color::rgb(0xDDEBF7),
        },
        Labels::english(),
        "2024-01-02 03:04:05",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::grouping::group_by_table;
    use rstest::rstest;

    fn shop_sheet() -> Sheet {
        let groups = group_by_table(fixtures::shop_rows());
        render_sheet("shop", &groups, &test_context()).unwrap()
    }

    #[rstest]
    fn test_render_sheet_empty_schema() {
        let sheet = render_sheet("empty", &[], &test_context()).unwrap();
        assert_eq!(sheet.name(), "empty");
        assert_eq!(sheet.max_row(), 0);
        assert!(sheet.merges().is_empty());
        assert_eq!(sheet.column_width(1), Some(2.0));
        assert_eq!(sheet.column_width(5), Some(15.0));
    }

    #[rstest]
    fn test_orders_scenario() {
        let rows = fixtures::orders_rows();
        let groups = group_by_table(rows);
        let sheet = render_sheet("shop", &groups, &test_context()).unwrap();

        assert_eq!(sheet.name(), "shop");
        assert_eq!(sheet.value(1, 2), &CellValue::from("shop"));
        assert_eq!(sheet.value(1, 6), &CellValue::from("orders"));

        let labels = Labels::english();
        for (col, label) in (1..=8).zip(labels.columns) {
            assert_eq!(sheet.value(4, col), &CellValue::from(label));
        }

        let first: Vec<CellValue> = (1..=8).map(|c| sheet.value(5, c).clone()).collect();
        assert_eq!(
            first,
            vec![
                CellValue::from("Order ID"),
                CellValue::Number(1),
                CellValue::from("id"),
                CellValue::from("int(11)"),
                CellValue::from("YES"),
                CellValue::from("PRI"),
                CellValue::Empty,
                CellValue::Empty,
            ]
        );
        let second: Vec<CellValue> = (1..=8).map(|c| sheet.value(6, c).clone()).collect();
        assert_eq!(
            second,
            vec![
                CellValue::from("Order status"),
                CellValue::Number(2),
                CellValue::from("status"),
                CellValue::from("varchar(20)"),
                CellValue::from("NO"),
                CellValue::Empty,
                CellValue::Empty,
                CellValue::Empty,
            ]
        );

        assert_eq!(sheet.border(5, 3).top, Line::Thick);
        assert_eq!(sheet.border(6, 3).top, Line::Thin);
        for col in 1..=8 {
            assert_eq!(sheet.border(1, col).top, Line::Thick);
            assert_eq!(sheet.border(6, col).bottom, Line::Thick);
        }
        for row in 1..=6 {
            assert_eq!(sheet.border(row, 1).left, Line::Thick);
            assert_eq!(sheet.border(row, 8).right, Line::Thick);
        }
        assert_eq!(sheet.max_row(), 6);
    }

    #[rstest]
    fn test_blocks_are_separated_by_one_blank_row() {
        let sheet = shop_sheet();

        // customers (3 columns): rows 1..=7, orders (2 columns): rows 9..=14
        assert_eq!(sheet.value(1, 6), &CellValue::from("customers"));
        assert!((1..=8).all(|c| sheet.cell(8, c).is_none()));
        assert_eq!(sheet.value(9, 6), &CellValue::from("orders"));
        assert_eq!(sheet.border(9, 4).top, Line::Thick);
        assert_eq!(sheet.max_row(), 14);
    }

    #[rstest]
    fn test_column_widths_follow_content() {
        let sheet = shop_sheet();

        // Longest unmerged value in column 4 is "Type & Length"
        assert_eq!(sheet.column_width(4), Some(15.0));
        assert_eq!(sheet.column_width(5), Some(15.0));
        assert_eq!(sheet.column_width(8), Some(15.0));
        // Column 7 holds "IDX" and "MUL"
        assert_eq!(sheet.column_width(7), Some(5.0));
    }

    #[rstest]
    fn test_render_is_repeatable() {
        assert_eq!(shop_sheet(), shop_sheet());
    }

    #[rstest]
    fn test_invalid_ordinal_fails_the_sheet() {
        let mut rows = fixtures::orders_rows();
        rows[1].ordinal = -3;
        let groups = group_by_table(rows);
        let err = render_sheet("shop", &groups, &test_context()).unwrap_err();
        assert!(err.to_string().contains("-3"));
    }
}
