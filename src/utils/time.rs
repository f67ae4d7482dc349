//! Time utilities: session start instants and file-name timestamps.

use chrono::{DateTime, Local};

/// Format used in output file names, e.g. `2025-11-28_14-03-09`.
pub const FILE_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Wall-clock seconds since the Unix epoch, with microsecond resolution.
pub fn now_seconds() -> f64 {
    to_seconds(&Local::now())
}

pub fn to_seconds(t: &DateTime<Local>) -> f64 {
    t.timestamp_micros() as f64 / 1_000_000.0
}

pub fn file_stamp(t: &DateTime<Local>) -> String {
    t.format(FILE_STAMP_FORMAT).to_string()
}
