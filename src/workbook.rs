//! Writes a rendered [`Document`] to an `.xlsx` file.

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Color as XlsxColor, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use thiserror::Error;
use tracing::info;

use crate::layout::{CellRef, CellStyle, CellValue, Document, Line, Sheet};

/// Persist error types
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to build sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: XlsxError,
    },

    #[error("Failed to save workbook '{path}': {source}")]
    Save {
        path: String,
        #[source]
        source: XlsxError,
    },
}

/// Save `document` to `path`, one worksheet per sheet in document order.
pub fn save_document(document: &Document, path: &Path) -> Result<(), PersistError> {
    let mut workbook = build_workbook(document)?;
    workbook.save(path).map_err(|source| PersistError::Save {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), sheets = document.sheets().len(), "saved workbook");
    Ok(())
}

/// Build the in-memory workbook without writing it.
pub fn build_workbook(document: &Document) -> Result<Workbook, PersistError> {
    let mut workbook = Workbook::new();
    let mut formats = FormatCache::default();

    for sheet in document.sheets() {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet, &mut formats).map_err(|source| PersistError::Sheet {
            sheet: sheet.name().to_string(),
            source,
        })?;
    }
    Ok(workbook)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &Sheet,
    formats: &mut FormatCache,
) -> Result<(), XlsxError> {
    worksheet.set_name(sheet.name())?;

    // Merges first: merge_range fills the whole range, then the non-anchor
    // cells below get their own borders written over it.
    for range in sheet.merges() {
        let anchor = sheet.cell(range.first.row, range.first.col);
        let value = anchor.map(|c| c.value.to_string()).unwrap_or_default();
        let style = anchor.map(|c| c.style).unwrap_or_default();
        worksheet.merge_range(
            row_index(range.first),
            col_index(range.first),
            row_index(range.last),
            col_index(range.last),
            &value,
            formats.get(style),
        )?;
    }

    let anchors: Vec<CellRef> = sheet.merges().iter().map(|m| m.first).collect();
    for (at, cell) in sheet.cells() {
        if anchors.contains(&at) {
            continue;
        }
        let format = formats.get(cell.style);
        let (row, col) = (row_index(at), col_index(at));
        match &cell.value {
            CellValue::Empty => worksheet.write_blank(row, col, format)?,
            CellValue::Text(text) => worksheet.write_string_with_format(row, col, text, format)?,
            CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n as f64, format)?,
        };
    }

    for (col, width) in sheet.column_widths() {
        worksheet.set_column_width(col - 1, width)?;
    }
    Ok(())
}

fn row_index(at: CellRef) -> u32 {
    at.row - 1
}

fn col_index(at: CellRef) -> u16 {
    at.col - 1
}

/// One `Format` per distinct cell style.
#[derive(Default)]
struct FormatCache {
    formats: HashMap<CellStyle, Format>,
}

impl FormatCache {
    fn get(&mut self, style: CellStyle) -> &Format {
        self.formats.entry(style).or_insert_with(|| to_format(style))
    }
}

fn to_format(style: CellStyle) -> Format {
    let mut format = Format::new()
        .set_border_left(to_border(style.border.left))
        .set_border_right(to_border(style.border.right))
        .set_border_top(to_border(style.border.top))
        .set_border_bottom(to_border(style.border.bottom));
    if style.bold {
        format = format.set_bold();
    }
    if style.centered {
        format = format
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
    }
    if let Some(fill) = style.fill {
        format = format.set_background_color(XlsxColor::RGB(fill.value()));
    }
    format
}

fn to_border(line: Line) -> FormatBorder {
    match line {
        Line::None => FormatBorder::None,
        Line::Thin => FormatBorder::Thin,
        Line::Thick => FormatBorder::Thick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::grouping::group_by_table;
    use crate::layout::{Border, Sheet, render_sheet, test_context};
    use rstest::rstest;
    use tempfile::tempdir;

    fn shop_document() -> Document {
        let mut document = Document::new();
        let groups = group_by_table(fixtures::shop_rows());
        document
            .push_sheet(render_sheet("shop", &groups, &test_context()).unwrap())
            .unwrap();
        document
    }

    #[rstest]
    fn test_save_document_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        save_document(&shop_document(), &path).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    /// Read one member of a saved `.xlsx` archive as text.
    fn archive_entry(path: &std::path::Path, name: &str) -> String {
        use std::io::Read;
        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    /// Style index (`s` attribute) of a cell in worksheet XML.
    fn style_index(sheet_xml: &str, cell: &str) -> Option<u32> {
        let start = sheet_xml.find(&format!("<c r=\"{}\"", cell))?;
        let tag = &sheet_xml[start..start + sheet_xml[start..].find('>')?];
        let s = tag.split(" s=\"").nth(1)?;
        s[..s.find('"')?].parse().ok()
    }

    #[rstest]
    fn test_saved_archive_carries_merges_borders_and_fills() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        save_document(&shop_document(), &path).unwrap();

        // Default is sheet1, shop is sheet2
        let sheet_xml = archive_entry(&path, "xl/worksheets/sheet2.xml");
        for range in ["B1:D1", "F1:H1", "B2:D2", "F2:H2", "B9:D9", "F9:H9"] {
            assert!(
                sheet_xml.contains(&format!("<mergeCell ref=\"{}\"/>", range)),
                "missing merge {range}"
            );
        }

        // Merge anchors keep their heading format; the cells under the merge
        // carry their own bordered format written after merge_range
        let anchor = style_index(&sheet_xml, "B1").unwrap();
        let covered = style_index(&sheet_xml, "C1").unwrap();
        assert_ne!(anchor, 0);
        assert_ne!(covered, 0);
        assert_ne!(anchor, covered);

        let styles = archive_entry(&path, "xl/styles.xml");
        assert!(styles.contains(r#"style="thick""#));
        assert!(styles.contains(r#"style="thin""#));
        assert!(styles.contains("BDD7EE"));
        assert!(styles.contains("DDEBF7"));
    }

    #[rstest]
    fn test_default_sheet_is_written_first_and_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        save_document(&shop_document(), &path).unwrap();

        let workbook_xml = archive_entry(&path, "xl/workbook.xml");
        let default_at = workbook_xml.find(r#"name="Default""#).unwrap();
        let shop_at = workbook_xml.find(r#"name="shop""#).unwrap();
        assert!(default_at < shop_at);

        let default_xml = archive_entry(&path, "xl/worksheets/sheet1.xml");
        assert!(!default_xml.contains("<c r="));
        assert!(!default_xml.contains("mergeCell"));
    }

    #[rstest]
    fn test_save_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");

        let err = save_document(&shop_document(), &path).unwrap_err();
        assert!(matches!(err, PersistError::Save { .. }));
    }

    #[rstest]
    fn test_invalid_sheet_name_fails() {
        let mut document = Document::new();
        document.push_sheet(Sheet::new("bad/name")).unwrap();

        let err = build_workbook(&document).err().unwrap();
        assert!(matches!(err, PersistError::Sheet { ref sheet, .. } if sheet == "bad/name"));
    }

    #[rstest]
    fn test_format_cache_reuses_formats() {
        let mut cache = FormatCache::default();
        let style = CellStyle::default().with_border(Border::THIN);
        cache.get(style);
        cache.get(style);
        cache.get(CellStyle::default());
        assert_eq!(cache.formats.len(), 2);
    }

    #[rstest]
    #[case(Line::None, FormatBorder::None)]
    #[case(Line::Thin, FormatBorder::Thin)]
    #[case(Line::Thick, FormatBorder::Thick)]
    fn test_to_border(#[case] line: Line, #[case] expected: FormatBorder) {
        assert_eq!(to_border(line), expected);
    }
}
