use crate::errors::AppResult;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::export::{OutputFormat, RowSink};
use crate::models::SessionRow;
use std::path::Path;

/// In-memory session table; nothing touches the disk until `save_as`.
#[derive(Debug, Clone)]
pub struct SessionTable {
    sheet: String,
    format: OutputFormat,
    marker: String,
    rows: Vec<SessionRow>,
}

impl SessionTable {
    /// `sheet` names the worksheet (XLSX); `marker` is the text written
    /// for occluded components in XLSX and CSV.
    pub fn new(sheet: &str, format: OutputFormat, marker: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            format,
            marker: marker.to_string(),
            rows: Vec::new(),
        }
    }
}

impl RowSink for SessionTable {
    fn append_row(&mut self, row: SessionRow) {
        self.rows.push(row);
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn save_as(&self, path: &Path) -> AppResult<()> {
        match self.format {
            OutputFormat::Xlsx => export_xlsx(&self.rows, &self.sheet, &self.marker, path),
            OutputFormat::Csv => export_csv(&self.rows, &self.marker, path),
            OutputFormat::Json => export_json(&self.rows, path),
        }
    }
}
