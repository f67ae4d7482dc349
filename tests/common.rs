#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use poselog::capture::{CaptureError, CaptureSource, ConnectMode};
use poselog::core::{CancellationSignal, SessionConfig};
use poselog::errors::{AppError, AppResult};
use poselog::export::RowSink;
use poselog::models::{Frame, RawPose, SessionRow};
use poselog::utils::time::now_seconds;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const OBJECT: &str = "hk_test";

pub fn plog() -> Command {
    cargo_bin_cmd!("poselog")
}

/// Create a fresh, empty directory inside the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("poselog_test_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Files currently in `dir`, sorted by name
pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read temp dir")
        .map(|e| e.expect("dir entry").path())
        .collect();
    files.sort();
    files
}

pub fn visible(position: [f64; 3], orientation: [f64; 4]) -> RawPose {
    RawPose::new(position, orientation)
}

pub fn session_config(output: &Path) -> SessionConfig {
    SessionConfig {
        address: "scripted:0".into(),
        mode: ConnectMode::Full,
        object: OBJECT.into(),
        output: output.to_string_lossy().to_string(),
        grace: Duration::ZERO,
        teardown: Duration::ZERO,
        occluded_marker: "nan".into(),
    }
}

pub enum Step {
    Frame(Frame),
    Fail(CaptureError),
    Panic,
}

/// Capture source that plays back a fixed script of frames and failures.
#[derive(Default)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    /// Triggered when the last scripted step is handed out.
    cancel_at_end: Option<CancellationSignal>,
    pub refuse_connect: bool,
    pub fail_disconnect: bool,
    pub connects: usize,
    pub disconnects: usize,
    pub frames_served: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame `n` holding `pose` for `OBJECT` (or nothing, when `None`).
    pub fn frame(mut self, n: u64, pose: Option<RawPose>) -> Self {
        let mut frame = Frame::new(n, 0.0);
        if let Some(p) = pose {
            frame = frame.with_object(OBJECT, p);
        }
        self.steps.push_back(Step::Frame(frame));
        self
    }

    pub fn fail(mut self, err: CaptureError) -> Self {
        self.steps.push_back(Step::Fail(err));
        self
    }

    pub fn panic(mut self) -> Self {
        self.steps.push_back(Step::Panic);
        self
    }

    pub fn cancel_at_end(mut self, signal: &CancellationSignal) -> Self {
        self.cancel_at_end = Some(signal.clone());
        self
    }
}

impl CaptureSource for ScriptedSource {
    fn connect(&mut self, address: &str, _mode: ConnectMode) -> Result<(), CaptureError> {
        if self.refuse_connect {
            return Err(CaptureError::InvalidAddress(address.to_string()));
        }
        self.connects += 1;
        Ok(())
    }

    fn next_unread_frame(&mut self) -> Result<Frame, CaptureError> {
        let step = self.steps.pop_front().ok_or(CaptureError::Exhausted)?;
        if self.steps.is_empty()
            && let Some(signal) = &self.cancel_at_end
        {
            signal.trigger();
        }

        match step {
            Step::Frame(mut frame) => {
                frame.capture_time = now_seconds();
                self.frames_served += 1;
                Ok(frame)
            }
            Step::Fail(e) => Err(e),
            Step::Panic => panic!("scripted source panic"),
        }
    }

    fn disconnect(&mut self) -> Result<(), CaptureError> {
        self.disconnects += 1;
        if self.fail_disconnect {
            return Err(CaptureError::NotConnected);
        }
        Ok(())
    }
}

/// Sink that keeps rows in memory and remembers every save.
#[derive(Default)]
pub struct RecordingSink {
    pub rows: Vec<SessionRow>,
    pub saved: RefCell<Vec<PathBuf>>,
    pub fail_save: bool,
}

impl RowSink for RecordingSink {
    fn append_row(&mut self, row: SessionRow) {
        self.rows.push(row);
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn save_as(&self, path: &Path) -> AppResult<()> {
        if self.fail_save {
            return Err(AppError::Persist {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            });
        }
        self.saved.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Write a replay log and return the `replay:` address for it
pub fn write_replay(dir: &Path, lines: &[&str]) -> String {
    let path = dir.join("take.jsonl");
    fs::write(&path, lines.join("\n")).expect("write replay log");
    format!("replay:{}", path.display())
}
