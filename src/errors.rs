//! Unified application error type.
//! Every module (capture, core, export, cli) returns AppError so that the
//! session can decide in one place which failures are fatal.

use crate::capture::CaptureError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Capture source
    // ---------------------------
    #[error("Failed to connect to capture source: {0}")]
    Connection(#[source] CaptureError),

    #[error("Acquisition stopped after {rows_written} rows: {source}")]
    Acquisition {
        rows_written: usize,
        #[source]
        source: CaptureError,
    },

    // ---------------------------
    // Output
    // ---------------------------
    #[error("Invalid output path '{0}': expected a .xlsx, .csv or .json file")]
    InvalidOutput(String),

    #[error("Failed to save {path}: {reason}")]
    Persist { path: PathBuf, reason: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Session lifecycle
    // ---------------------------
    #[error("Invalid session transition: {0}")]
    State(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
