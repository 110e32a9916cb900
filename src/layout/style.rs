//! Immutable cell style values.
//!
//! Styles are plain `Copy` values. Composing a border never mutates an
//! existing one: each `with_*` call returns a new `Border` that differs only in
//! the edge it names, which is what lets later passes add thick edges on top of
//! earlier thin ones.

use std::fmt;

use thiserror::Error;

/// Line weight of one cell edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Line {
    #[default]
    None,
    Thin,
    Thick,
}

/// The four edges of a cell border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Border {
    pub left: Line,
    pub right: Line,
    pub top: Line,
    pub bottom: Line,
}

impl Border {
    pub const NONE: Border = Border::uniform(Line::None);
    pub const THIN: Border = Border::uniform(Line::Thin);

    pub const fn uniform(line: Line) -> Self {
        Self {
            left: line,
            right: line,
            top: line,
            bottom: line,
        }
    }

    pub const fn with_left(self, left: Line) -> Self {
        Self { left, ..self }
    }

    pub const fn with_right(self, right: Line) -> Self {
        Self { right, ..self }
    }

    pub const fn with_top(self, top: Line) -> Self {
        Self { top, ..self }
    }

    pub const fn with_bottom(self, bottom: Line) -> Self {
        Self { bottom, ..self }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid color '{value}': expected RRGGBB, #RRGGBB or AARRGGBB hex")]
pub struct ColorParseError {
    pub value: String,
}

/// 24-bit RGB fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const fn rgb(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Parse `RRGGBB`, `#RRGGBB` or `AARRGGBB`. The alpha byte is dropped.
    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError {
            value: value.to_string(),
        };
        let digits = value.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(err());
        }
        let digits = match digits.len() {
            6 => digits,
            8 => &digits[2..],
            _ => return Err(err()),
        };
        let bytes = hex::decode(digits).map_err(|_| err())?;
        Ok(Self::rgb(
            (u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]),
        ))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

/// Font, alignment, fill and border of one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub bold: bool,
    pub centered: bool,
    pub fill: Option<Color>,
    pub border: Border,
}

impl CellStyle {
    /// Bold, centered text on a solid fill.
    pub const fn heading(fill: Color) -> Self {
        Self {
            bold: true,
            centered: true,
            fill: Some(fill),
            border: Border::NONE,
        }
    }

    pub const fn with_border(self, border: Border) -> Self {
        Self { border, ..self }
    }
}

/// The two fill colors used by every block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Title section labels and values.
    pub main: Color,
    /// Column-header row.
    pub sub: Color,
}

/// Fixed label text written into each block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub schema_name: &'static str,
    pub table_name: &'static str,
    pub created_at: &'static str,
    pub table_comment: &'static str,
    /// Column-header row, left to right.
    pub columns: [&'static str; 8],
}

impl Labels {
    pub fn korean() -> Self {
        Self {
            schema_name: "스키마 명",
            table_name: "테이블 명",
            created_at: "작성일자",
            table_comment: "테이블 설명",
            columns: [
                "컬럼명",
                "No",
                "컬럼 ID",
                "타입 및 길이",
                "Not Null",
                "PK",
                "IDX",
                "비고",
            ],
        }
    }

    pub fn english() -> Self {
        Self {
            schema_name: "Schema",
            table_name: "Table",
            created_at: "Created",
            table_comment: "Description",
            columns: [
                "Column",
                "No",
                "Column ID",
                "Type & Length",
                "Not Null",
                "PK",
                "IDX",
                "Remarks",
            ],
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::korean()
    }
}
