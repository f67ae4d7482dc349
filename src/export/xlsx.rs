// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::{notify_export_success, persist_error};
use crate::models::{Cell, HEADERS, SessionRow};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Data rows per worksheet: Excel's 1,048,576 rows minus the header.
pub(crate) const MAX_SHEET_ROWS: usize = 1_048_575;

/// Excel limits sheet names to 31 characters and forbids a few symbols.
fn sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(31)
        .collect();

    if cleaned.trim().is_empty() {
        "Pose".to_string()
    } else {
        cleaned
    }
}

/// Name of the `page`-th sheet (0-based): `name`, then `name_2`, `name_3`, ...
/// The base is shortened so the suffix still fits in 31 characters.
fn page_name(name: &str, page: usize) -> String {
    let base = sheet_name(name);
    if page == 0 {
        return base;
    }

    let suffix = format!("_{}", page + 1);
    let keep = 31 - suffix.len();
    let mut paged: String = base.chars().take(keep).collect();
    paged.push_str(&suffix);
    paged
}

/// Styled header, frozen first row and column widths fitted to the content.
/// Sessions longer than one sheet continue on numbered sheets.
pub(crate) fn export_xlsx(
    rows: &[SessionRow],
    sheet: &str,
    marker: &str,
    path: &Path,
) -> AppResult<()> {
    export_xlsx_paged(rows, sheet, marker, path, MAX_SHEET_ROWS).map(|_| ())
}

/// Like `export_xlsx` with a custom sheet capacity. Returns the sheet names
/// written, in order.
pub(crate) fn export_xlsx_paged(
    rows: &[SessionRow],
    sheet: &str,
    marker: &str,
    path: &Path,
    rows_per_sheet: usize,
) -> AppResult<Vec<String>> {
    let rows_per_sheet = rows_per_sheet.clamp(1, MAX_SHEET_ROWS);
    let mut workbook = Workbook::new();
    let mut names = Vec::new();

    // An empty session still gets one sheet with the header.
    let mut pages: Vec<&[SessionRow]> = rows.chunks(rows_per_sheet).collect();
    if pages.is_empty() {
        pages.push(&[]);
    }

    for (page, chunk) in pages.into_iter().enumerate() {
        let name = page_name(sheet, page);
        write_sheet(workbook.add_worksheet(), &name, chunk, marker, path)?;
        names.push(name);
    }

    workbook.save(path).map_err(persist_error(path))?;

    if names.len() > 1 {
        debug!(sheets = names.len(), rows = rows.len(), "xlsx split over several sheets");
    }
    notify_export_success("XLSX", path);
    Ok(names)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    rows: &[SessionRow],
    marker: &str,
    path: &Path,
) -> AppResult<()> {
    worksheet.set_name(name).map_err(persist_error(path))?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(persist_error(path))?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = HEADERS.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let int_format = Format::new().set_align(FormatAlign::Right);
    let time_format = Format::new().set_num_format("0.000");
    let num_format = Format::new().set_num_format("0.000000");
    let marker_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_font_color(Color::RGB(0x808080));

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, r) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;

        for (col, cell) in r.cells().iter().enumerate() {
            let c = col as u16;
            let width = match *cell {
                Cell::Integer(n) => {
                    worksheet
                        .write_with_format(row, c, n as f64, &int_format)
                        .map_err(persist_error(path))?;
                    n.to_string().len()
                }
                Cell::Number(v) => {
                    let fmt = if col == 1 { &time_format } else { &num_format };
                    worksheet
                        .write_with_format(row, c, v, fmt)
                        .map_err(persist_error(path))?;
                    if col == 1 {
                        format!("{v:.3}").len()
                    } else {
                        format!("{v:.6}").len()
                    }
                }
                Cell::Occluded => {
                    worksheet
                        .write_with_format(row, c, marker, &marker_format)
                        .map_err(persist_error(path))?;
                    UnicodeWidthStr::width(marker)
                }
            };
            col_widths[col] = col_widths[col].max(width);
        }
    }

    // ---------------------------
    // Set column widths
    // ---------------------------
    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(persist_error(path))?;
    }

    Ok(())
}
