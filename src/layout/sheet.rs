//! In-memory document model the renderer writes into.
//!
//! Rows and columns are 1-based, matching the way blocks are described
//! (column 1 is the leftmost column of a block). The workbook sink converts to
//! the writer's 0-based indices.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::RenderError;
use super::style::{Border, CellStyle};

/// Name of the sheet every document starts with. It is never written to.
pub const DEFAULT_SHEET_NAME: &str = "Default";

/// Longest sheet name a workbook accepts, in characters.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const FORBIDDEN_SHEET_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Why a name cannot be used for a sheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetNameError {
    #[error("sheet names are limited to {max} characters (got {len})")]
    TooLong { len: usize, max: usize },

    #[error("sheet names cannot contain '{0}'")]
    ForbiddenCharacter(char),

    #[error("sheet names cannot start or end with an apostrophe")]
    Apostrophe,

    #[error("the name is taken by the default sheet")]
    Reserved,
}

/// Check that `name` is usable for a schema sheet.
pub fn check_sheet_name(name: &str) -> Result<(), SheetNameError> {
    let len = name.chars().count();
    if len > MAX_SHEET_NAME_CHARS {
        return Err(SheetNameError::TooLong {
            len,
            max: MAX_SHEET_NAME_CHARS,
        });
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(c)) {
        return Err(SheetNameError::ForbiddenCharacter(c));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(SheetNameError::Apostrophe);
    }
    if same_sheet_name(name, DEFAULT_SHEET_NAME) {
        return Err(SheetNameError::Reserved);
    }
    Ok(())
}

/// Sheet names are compared case-insensitively.
pub fn same_sheet_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// A 1-based cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }
}

/// Value held by a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(i64),
}

impl CellValue {
    /// Character count of the displayed value, or `None` when there is nothing to show.
    pub fn display_len(&self) -> Option<usize> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Text(s) => Some(s.chars().count()),
            CellValue::Number(0) => None,
            CellValue::Number(n) => Some(n.to_string().len()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// An inclusive rectangular merge. The top-left cell holds the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first: CellRef,
    pub last: CellRef,
}

impl MergeRange {
    /// Merge `first_col..=last_col` on a single row.
    pub const fn row_span(row: u32, first_col: u16, last_col: u16) -> Self {
        Self {
            first: CellRef::new(row, first_col),
            last: CellRef::new(row, last_col),
        }
    }

    pub fn contains(&self, at: CellRef) -> bool {
        (self.first.row..=self.last.row).contains(&at.row)
            && (self.first.col..=self.last.col).contains(&at.col)
    }
}

/// One worksheet: cells, merges and column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<CellRef, Cell>,
    merges: Vec<MergeRange>,
    column_widths: BTreeMap<u16, f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            merges: Vec::new(),
            column_widths: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&CellRef::new(row, col))
    }

    /// Cell at `at`, created empty if it does not exist yet.
    pub fn cell_mut(&mut self, at: CellRef) -> &mut Cell {
        self.cells.entry(at).or_default()
    }

    /// Value at a position, `Empty` when the cell was never touched.
    pub fn value(&self, row: u32, col: u16) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.cell(row, col).map(|c| &c.value).unwrap_or(EMPTY)
    }

    pub fn border(&self, row: u32, col: u16) -> Border {
        self.cell(row, col).map(|c| c.style.border).unwrap_or_default()
    }

    pub fn set_value(&mut self, at: CellRef, value: impl Into<CellValue>) {
        self.cell_mut(at).value = value.into();
    }

    pub fn set_style(&mut self, at: CellRef, style: CellStyle) {
        self.cell_mut(at).style = style;
    }

    /// Replace the border of a cell with one derived from its current border.
    pub fn update_border(&mut self, at: CellRef, compose: impl FnOnce(Border) -> Border) {
        let cell = self.cell_mut(at);
        cell.style.border = compose(cell.style.border);
    }

    pub fn merge(&mut self, range: MergeRange) {
        self.merges.push(range);
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    /// Whether the cell lies anywhere inside a merged range, anchor included.
    pub fn is_merged(&self, at: CellRef) -> bool {
        self.merges.iter().any(|m| m.contains(at))
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells.iter().map(|(at, cell)| (*at, cell))
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, col: u16) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells().filter(move |(at, _)| at.col == col)
    }

    /// Last row holding a cell, 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|at| at.row).max().unwrap_or(0)
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.column_widths.iter().map(|(col, width)| (*col, *width))
    }
}

/// Ordered collection of sheets, starting with the untouched default sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    sheets: Vec<Sheet>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            sheets: vec![Sheet::new(DEFAULT_SHEET_NAME)],
        }
    }

    /// Append a sheet. Sheet names must be unique within the document,
    /// ignoring case.
    pub fn push_sheet(&mut self, sheet: Sheet) -> Result<(), RenderError> {
        if self.sheets.iter().any(|s| same_sheet_name(s.name(), sheet.name())) {
            return Err(RenderError::DuplicateSheet {
                name: sheet.name().to_string(),
            });
        }
        self.sheets.push(sheet);
        Ok(())
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
