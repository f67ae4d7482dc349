use crate::models::pose::{PoseSample, Tracked};
use serde::Serialize;

/// Column layout of every output table: frame metadata, position, orientation.
pub const HEADERS: [&str; 9] = ["Number", "Time", "x", "y", "z", "qw", "qx", "qy", "qz"];

/// One persisted record: frame metadata plus the decoded pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionRow {
    pub frame_number: u64,
    /// Seconds since the session start instant.
    pub elapsed_seconds: f64,
    pub sample: PoseSample,
}

/// A single typed cell; the row schema never needs runtime type checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Integer(u64),
    Number(f64),
    Occluded,
}

impl SessionRow {
    pub fn new(frame_number: u64, capture_time: f64, session_start: f64, sample: PoseSample) -> Self {
        Self {
            frame_number,
            elapsed_seconds: capture_time - session_start,
            sample,
        }
    }

    /// Cells in `HEADERS` order.
    pub fn cells(&self) -> [Cell; 9] {
        let mut cells = [Cell::Occluded; 9];
        cells[0] = Cell::Integer(self.frame_number);
        cells[1] = Cell::Number(self.elapsed_seconds);

        if let Tracked::Visible(p) = self.sample.position {
            for (i, v) in p.iter().enumerate() {
                cells[2 + i] = Cell::Number(*v);
            }
        }
        if let Tracked::Visible(q) = self.sample.orientation {
            for (i, v) in q.iter().enumerate() {
                cells[5 + i] = Cell::Number(*v);
            }
        }

        cells
    }
}

/// Flat row used by the JSON export; occluded components become `null`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RowExport {
    pub frame: u64,
    pub time: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub qw: Option<f64>,
    pub qx: Option<f64>,
    pub qy: Option<f64>,
    pub qz: Option<f64>,
}

impl From<&SessionRow> for RowExport {
    fn from(row: &SessionRow) -> Self {
        let p = row.sample.position.visible();
        let q = row.sample.orientation.visible();
        Self {
            frame: row.frame_number,
            time: row.elapsed_seconds,
            x: p.map(|p| p[0]),
            y: p.map(|p| p[1]),
            z: p.map(|p| p[2]),
            qw: q.map(|q| q[0]),
            qx: q.map(|q| q[1]),
            qy: q.map(|q| q[2]),
            qz: q.map(|q| q[3]),
        }
    }
}
