//! Session lifecycle: connect, run the acquisition loop, and always
//! disconnect and save afterwards.
//!
//! Teardown lives in `Drop` for `ActiveSession`, so it also runs when the
//! loop unwinds from a panic. The normal path calls `close()` explicitly to
//! get the results back.

use crate::capture::{CaptureError, CaptureSource, ConnectMode};
use crate::config::Config;
use crate::core::acquisition::{self, StopReason};
use crate::core::cancel::CancellationSignal;
use crate::errors::{AppError, AppResult};
use crate::export::{OutputFormat, RowSink, SessionTable, prepare_output_path};
use crate::ui::messages::{error, info, warning};
use crate::utils::path::render_template;
use crate::utils::time::{file_stamp, to_seconds};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Session states, in the only order they may be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    NotStarted,
    Connected,
    Running,
    Draining,
    Closed,
}

/// Forward-only state holder.
#[derive(Debug)]
pub struct Lifecycle {
    state: SessionState,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            state: SessionState::NotStarted,
        }
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn advance(&mut self, next: SessionState) -> AppResult<()> {
        if next <= self.state {
            return Err(AppError::State(format!("{:?} -> {:?}", self.state, next)));
        }
        debug!(from = ?self.state, to = ?next, "session state");
        self.state = next;
        Ok(())
    }
}

/// Everything a session needs, fixed before it starts.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub address: String,
    pub mode: ConnectMode,
    pub object: String,
    /// Output path template, see `utils::path::render_template`.
    pub output: String,
    pub grace: Duration,
    pub teardown: Duration,
    pub occluded_marker: String,
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            address: cfg.address.clone(),
            mode: ConnectMode::from_flag(cfg.lightweight),
            object: cfg.object.clone(),
            output: cfg.output.clone(),
            grace: Duration::from_millis(cfg.grace_ms),
            teardown: Duration::from_millis(cfg.teardown_ms),
            occluded_marker: cfg.occluded_marker.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub rows_written: usize,
    /// Set when the loop ended without an error.
    pub stop: Option<StopReason>,
    /// Where the table was saved, if saving succeeded.
    pub output: Option<PathBuf>,
    pub state: SessionState,
}

#[derive(Debug)]
pub struct SessionOutcome {
    pub report: SessionReport,
    /// First fatal error of the session, if any.
    pub result: AppResult<()>,
}

impl SessionOutcome {
    fn aborted(state: SessionState, err: AppError) -> Self {
        Self {
            report: SessionReport {
                rows_written: 0,
                stop: None,
                output: None,
                state,
            },
            result: Err(err),
        }
    }

    pub fn into_result(self) -> AppResult<SessionReport> {
        self.result.map(|_| self.report)
    }
}

struct Teardown {
    disconnect: Option<CaptureError>,
    saved: AppResult<PathBuf>,
}

/// Connected session. Dropping it without `close()` still tears it down.
struct ActiveSession<'a, S: CaptureSource + ?Sized, T: RowSink + ?Sized> {
    source: &'a mut S,
    sink: &'a mut T,
    lifecycle: Lifecycle,
    target: PathBuf,
    teardown: Duration,
}

impl<S: CaptureSource + ?Sized, T: RowSink + ?Sized> ActiveSession<'_, S, T> {
    fn enter(&mut self, next: SessionState) {
        if let Err(e) = self.lifecycle.advance(next) {
            warn!(error = %e, "unexpected session transition");
        }
    }

    fn close(&mut self) -> Teardown {
        self.enter(SessionState::Draining);
        info("Cleaning up...");
        thread::sleep(self.teardown);

        let disconnect = self.source.disconnect().err();
        if let Some(e) = &disconnect {
            warn!(error = %e, "disconnect failed");
            warning(format!("Disconnect failed: {e}"));
        }

        let saved = save(&*self.sink, &self.target);
        self.enter(SessionState::Closed);

        Teardown { disconnect, saved }
    }
}

impl<S: CaptureSource + ?Sized, T: RowSink + ?Sized> Drop for ActiveSession<'_, S, T> {
    fn drop(&mut self) {
        if self.lifecycle.state() == SessionState::Closed {
            return;
        }
        if thread::panicking() {
            error("Session aborted, saving the rows collected so far");
        }
        if let Err(e) = self.close().saved {
            error(e);
        }
    }
}

fn save<T: RowSink + ?Sized>(sink: &T, target: &Path) -> AppResult<PathBuf> {
    let path = prepare_output_path(target).map_err(|e| AppError::Persist {
        path: target.to_path_buf(),
        reason: e.to_string(),
    })?;
    sink.save_as(&path)?;
    Ok(path)
}

/// Run a session writing into a fresh `SessionTable` built from `cfg`.
///
/// An unusable output template is rejected before any connection attempt.
pub fn run_session<S: CaptureSource + ?Sized>(
    cfg: &SessionConfig,
    source: &mut S,
    signal: &CancellationSignal,
) -> SessionOutcome {
    let format = match OutputFormat::from_path(&cfg.output) {
        Ok(format) => format,
        Err(e) => return SessionOutcome::aborted(SessionState::NotStarted, e),
    };
    let mut table = SessionTable::new(&cfg.object, format, &cfg.occluded_marker);

    run_session_with(cfg, source, &mut table, signal)
}

/// Run a session against an already initialized sink.
pub fn run_session_with<S, T>(
    cfg: &SessionConfig,
    source: &mut S,
    sink: &mut T,
    signal: &CancellationSignal,
) -> SessionOutcome
where
    S: CaptureSource + ?Sized,
    T: RowSink + ?Sized,
{
    let mut lifecycle = Lifecycle::new();

    if let Err(e) = source.connect(&cfg.address, cfg.mode) {
        return SessionOutcome::aborted(lifecycle.state(), AppError::Connection(e));
    }
    if let Err(e) = lifecycle.advance(SessionState::Connected) {
        return SessionOutcome::aborted(lifecycle.state(), e);
    }

    let started = Local::now();
    let session_start = to_seconds(&started);
    let target = render_template(&cfg.output, &file_stamp(&started));

    let mut session = ActiveSession {
        source,
        sink,
        lifecycle,
        target,
        teardown: cfg.teardown,
    };

    if !cfg.grace.is_zero() {
        info(format!(
            "Starting in {:.1} seconds...",
            cfg.grace.as_secs_f64()
        ));
        thread::sleep(cfg.grace);
    }

    session.enter(SessionState::Running);
    let looped = acquisition::run(
        &mut *session.source,
        &mut *session.sink,
        signal,
        &cfg.object,
        session_start,
    );

    let teardown = session.close();
    let state = session.lifecycle.state();
    drop(session);

    let (rows_written, stop, mut first_error) = match looped {
        Ok(summary) => (summary.rows_written, Some(summary.stop), None),
        Err(e) => (
            e.rows_written,
            None,
            Some(AppError::Acquisition {
                rows_written: e.rows_written,
                source: e.source,
            }),
        ),
    };

    if let Some(e) = &teardown.disconnect {
        debug!(error = %e, "disconnect error not propagated");
    }

    let output = match teardown.saved {
        Ok(path) => Some(path),
        Err(e) => {
            match first_error {
                None => first_error = Some(e),
                Some(_) => error(format!("Also failed to save: {e}")),
            }
            None
        }
    };

    SessionOutcome {
        report: SessionReport {
            rows_written,
            stop,
            output,
            state,
        },
        result: first_error.map_or(Ok(()), Err),
    }
}
