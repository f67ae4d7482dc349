//! The acquisition loop: one frame in, at most one row out, until the
//! signal is set or the source fails.

use crate::capture::{CaptureError, CaptureSource};
use crate::core::cancel::CancellationSignal;
use crate::core::codec;
use crate::export::RowSink;
use crate::models::{PoseSample, SessionRow};
use tracing::{debug, info, warn};

/// Why the loop ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    /// A finite source ran out of frames.
    SourceExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub rows_written: usize,
    pub stop: StopReason,
}

/// Source failure in the middle of a session. Rows appended before the
/// failure stay in the sink.
#[derive(Debug)]
pub struct AcquisitionError {
    pub rows_written: usize,
    pub source: CaptureError,
}

/// Pull frames from `source` and append one row per frame to `sink`.
///
/// `session_start` is on the same clock as the frames' capture time.
/// Cancellation is only observed between frames.
pub fn run<S, T>(
    source: &mut S,
    sink: &mut T,
    signal: &CancellationSignal,
    object: &str,
    session_start: f64,
) -> Result<LoopSummary, AcquisitionError>
where
    S: CaptureSource + ?Sized,
    T: RowSink + ?Sized,
{
    let mut rows_written = 0usize;

    loop {
        if signal.check() {
            info!(rows_written, "stop requested");
            return Ok(LoopSummary {
                rows_written,
                stop: StopReason::Cancelled,
            });
        }

        let frame = match source.next_unread_frame() {
            Ok(frame) => frame,
            Err(CaptureError::Exhausted) => {
                info!(rows_written, "capture source exhausted");
                return Ok(LoopSummary {
                    rows_written,
                    stop: StopReason::SourceExhausted,
                });
            }
            Err(e) => {
                warn!(rows_written, error = %e, "frame acquisition failed");
                return Err(AcquisitionError {
                    rows_written,
                    source: e,
                });
            }
        };

        // An object missing from the frame is recorded like a full occlusion.
        let sample = match source.resolve_object(&frame, object) {
            Some(raw) => codec::decode_raw(&raw),
            None => {
                debug!(frame = frame.frame_number, object, "object not in frame");
                PoseSample::occluded()
            }
        };

        let row = SessionRow::new(frame.frame_number, frame.capture_time, session_start, sample);
        debug!(
            frame = row.frame_number,
            elapsed = row.elapsed_seconds,
            position = ?row.sample.position,
            orientation = ?row.sample.orientation,
            "row"
        );
        sink.append_row(row);
        rows_written += 1;
    }
}
