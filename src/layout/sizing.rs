//! Column widths for a rendered sheet.

use super::block::BLOCK_WIDTH;
use super::sheet::Sheet;

/// Width given to the Not Null (5th) and remarks (8th) columns regardless of content.
pub const FIXED_COLUMN_WIDTH: f64 = 15.0;

/// Padding added to the longest value of a measured column.
pub const WIDTH_PADDING: usize = 2;

fn is_fixed_width(col: u16) -> bool {
    col == 5 || col == 8
}

/// Width for one column: longest displayed value plus padding.
///
/// Cells inside merged ranges (anchors included) are skipped, and so are cells
/// with nothing to display.
pub fn measure_column(sheet: &Sheet, col: u16) -> f64 {
    if is_fixed_width(col) {
        return FIXED_COLUMN_WIDTH;
    }

    let longest = sheet
        .column(col)
        .filter(|(at, _)| !sheet.is_merged(*at))
        .filter_map(|(_, cell)| cell.value.display_len())
        .max()
        .unwrap_or(0);

    (longest + WIDTH_PADDING) as f64
}

/// Assign a width to every block column.
pub fn apply_column_widths(sheet: &mut Sheet) {
    for col in 1..=BLOCK_WIDTH {
        let width = measure_column(sheet, col);
        sheet.set_column_width(col, width);
    }
}
