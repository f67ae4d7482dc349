// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::{notify_export_success, persist_error};
use crate::models::row::RowExport;
use crate::models::{Cell, HEADERS, SessionRow};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed; occluded components become `null`.
pub(crate) fn export_json(rows: &[SessionRow], path: &Path) -> AppResult<()> {
    let items: Vec<RowExport> = rows.iter().map(RowExport::from).collect();

    let json_data = serde_json::to_string_pretty(&items).map_err(persist_error(path))?;

    let mut file = File::create(path).map_err(persist_error(path))?;
    file.write_all(json_data.as_bytes())
        .map_err(persist_error(path))?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV: header row, then one record per session row.
pub(crate) fn export_csv(rows: &[SessionRow], marker: &str, path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(persist_error(path))?;

    wtr.write_record(HEADERS).map_err(persist_error(path))?;

    for row in rows {
        let record = row.cells().map(|c| cell_text(c, marker));
        wtr.write_record(&record).map_err(persist_error(path))?;
    }

    wtr.flush().map_err(persist_error(path))?;

    notify_export_success("CSV", path);
    Ok(())
}

fn cell_text(cell: Cell, marker: &str) -> String {
    match cell {
        Cell::Integer(n) => n.to_string(),
        Cell::Number(v) => v.to_string(),
        Cell::Occluded => marker.to_string(),
    }
}
