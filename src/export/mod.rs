// src/export/mod.rs

mod fs_utils;
mod json_csv;
mod table;
mod xlsx;

pub use fs_utils::prepare_output_path;
pub use table::SessionTable;

use crate::errors::{AppError, AppResult};
use crate::models::SessionRow;
use crate::ui::messages::success;
use std::path::Path;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} saved: {}", path.display()));
}

/// Sequential-row sink the acquisition loop writes into.
pub trait RowSink {
    fn append_row(&mut self, row: SessionRow);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write every appended row to `path`.
    fn save_as(&self, path: &Path) -> AppResult<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &str) -> AppResult<Self> {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());

        match ext.as_deref() {
            Some("xlsx") => Ok(OutputFormat::Xlsx),
            Some("csv") => Ok(OutputFormat::Csv),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(AppError::InvalidOutput(path.to_string())),
        }
    }
}

pub(crate) fn persist_error<E: std::fmt::Display>(path: &Path) -> impl Fn(E) -> AppError + '_ {
    move |e| AppError::Persist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
