//! Rendering of one table block.
//!
//! A block is eight columns wide:
//!
//! ```text
//! r      | schema label | schema name (2-4)  | table label   | table name (6-8)   |
//! r+1    | created label| timestamp (2-4)    | comment label | table comment (6-8)|
//! r+2    (gap row, only the outer frame)
//! r+3    | 8 column-header labels                                                |
//! r+4..  | one row per column                                                    |
//! ```
//!
//! The block is closed by a thick frame, and the next block starts two rows
//! below its last row.

use super::RenderContext;
use super::RenderError;
use super::sheet::{CellRef, MergeRange, Sheet};
use super::style::{Border, CellStyle, Line};
use crate::types::{ColumnRow, TableGroup};

pub const BLOCK_WIDTH: u16 = 8;

/// Rows spanned by a rendered block, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockExtent {
    pub first_row: u32,
    pub last_row: u32,
}

impl BlockExtent {
    pub fn header_row(&self) -> u32 {
        self.first_row + 3
    }

    /// Top row of the block that follows, leaving one blank separator row.
    pub fn next_block_row(&self) -> u32 {
        self.last_row + 2
    }
}

/// Render `group` starting at `top_row` and return the rows it occupies.
///
/// Ordinals are checked before anything is written, so a rejected group leaves
/// the sheet untouched.
pub fn render_block(
    sheet: &mut Sheet,
    schema: &str,
    group: &TableGroup,
    ctx: &RenderContext,
    top_row: u32,
) -> Result<BlockExtent, RenderError> {
    if let Some(bad) = group.columns.iter().find(|c| c.ordinal < 1) {
        return Err(RenderError::InvalidOrdinal {
            table: group.name.clone(),
            column: bad.column_name.clone(),
            ordinal: bad.ordinal,
        });
    }

    render_title(sheet, schema, group, ctx, top_row);

    let header_row = top_row + 3;
    render_column_header(sheet, ctx, header_row);

    let mut row = header_row;
    for (index, column) in group.columns.iter().enumerate() {
        row += 1;
        render_column_row(sheet, column, row, index == 0);
    }

    let extent = BlockExtent {
        first_row: top_row,
        last_row: row,
    };
    apply_frame(sheet, extent);
    Ok(extent)
}

fn render_title(sheet: &mut Sheet, schema: &str, group: &TableGroup, ctx: &RenderContext, row: u32) {
    let heading = CellStyle::heading(ctx.palette.main);
    let lines: [(&str, &str, &str, &str); 2] = [
        (ctx.labels.schema_name, schema, ctx.labels.table_name, group.name.as_str()),
        (
            ctx.labels.created_at,
            ctx.created_at.as_str(),
            ctx.labels.table_comment,
            group.comment.as_str(),
        ),
    ];

    for (offset, (left_label, left_value, right_label, right_value)) in lines.into_iter().enumerate() {
        let r = row + offset as u32;
        sheet.merge(MergeRange::row_span(r, 2, 4));
        sheet.merge(MergeRange::row_span(r, 6, 8));

        for (col, value) in [(1, left_label), (2, left_value), (5, right_label), (6, right_value)] {
            let at = CellRef::new(r, col);
            sheet.set_value(at, value);
            sheet.set_style(at, heading);
        }
    }

    for col in 1..=BLOCK_WIDTH {
        for r in row..row + 2 {
            sheet.update_border(CellRef::new(r, col), |_| Border::THIN);
        }
        sheet.update_border(CellRef::new(row + 1, col), |b| b.with_bottom(Line::Thick));
    }
}

fn render_column_header(sheet: &mut Sheet, ctx: &RenderContext, row: u32) {
    let style = CellStyle::heading(ctx.palette.sub).with_border(
        Border::THIN
            .with_top(Line::Thick)
            .with_bottom(Line::Thick),
    );
    for (col, label) in (1..=BLOCK_WIDTH).zip(ctx.labels.columns) {
        let at = CellRef::new(row, col);
        sheet.set_value(at, label);
        sheet.set_style(at, style);
    }
}

fn render_column_row(sheet: &mut Sheet, column: &ColumnRow, row: u32, first: bool) {
    let border = if first {
        Border::THIN.with_top(Line::Thick)
    } else {
        Border::THIN
    };
    let style = CellStyle::default().with_border(border);

    let at = |col| CellRef::new(row, col);
    sheet.set_value(at(1), column.comment.as_str());
    sheet.set_value(at(2), column.ordinal);
    sheet.set_value(at(3), column.column_name.as_str());
    sheet.set_value(at(4), column.column_type.as_str());
    sheet.set_value(at(5), column.not_null_label());
    if column.is_primary_key() {
        sheet.set_value(at(6), column.key_type.as_str());
    }
    if column.is_indexed() {
        sheet.set_value(at(7), column.key_type.as_str());
    }
    // Column 8 is left for hand-written remarks
    for col in 1..=BLOCK_WIDTH {
        sheet.set_style(at(col), style);
    }
}

/// Force a thick outer rectangle onto every cell of the block.
fn apply_frame(sheet: &mut Sheet, extent: BlockExtent) {
    for row in extent.first_row..=extent.last_row {
        for col in 1..=BLOCK_WIDTH {
            sheet.update_border(CellRef::new(row, col), |b| {
                let mut b = b;
                if col == 1 {
                    b = b.with_left(Line::Thick);
                }
                if col == BLOCK_WIDTH {
                    b = b.with_right(Line::Thick);
                }
                if row == extent.first_row {
                    b = b.with_top(Line::Thick);
                }
                if row == extent.last_row {
                    b = b.with_bottom(Line::Thick);
                }
                b
            });
        }
    }
}
