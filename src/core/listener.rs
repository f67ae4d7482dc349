//! Out-of-band stop requests: the operator's Enter key and process signals.
//! Neither ever touches the session; they only set the signal.

use crate::core::cancel::CancellationSignal;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{prompt, warning};
use std::io::BufRead;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Exit status used when a second interrupt aborts a stalled session.
pub const ABORT_EXIT_CODE: i32 = 130;

/// Spawn the thread that waits for one line on `input` and then triggers
/// `signal`.
///
/// End of input (stdin closed, non-interactive run) leaves the signal
/// untouched; the session then ends with its source.
pub fn spawn_operator_listener<R>(mut input: R, signal: CancellationSignal) -> AppResult<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("operator-listener".into())
        .spawn(move || {
            prompt("Press ENTER to stop...");

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => debug!("operator input closed, stop key disabled"),
                Ok(_) => {
                    if signal.trigger() {
                        info!("stop requested by operator");
                    }
                }
                Err(e) => warn!(error = %e, "operator input failed, stop key disabled"),
            }
        })?;

    Ok(handle)
}

/// Route SIGINT, SIGTERM and SIGHUP (Ctrl+C and Ctrl+Break on Windows) into
/// `signal`. The first one asks for a clean stop; a second one, e.g. while
/// the source is stalled, exits immediately.
pub fn install_interrupt_handler(signal: CancellationSignal) -> AppResult<()> {
    ctrlc::set_handler(move || {
        if signal.trigger() {
            warning("Stop signal received, stopping after the current frame (Ctrl+C again to abort)");
        } else {
            warning("Aborted");
            std::process::exit(ABORT_EXIT_CODE);
        }
    })
    .map_err(|e| AppError::Other(format!("cannot install signal handler: {e}")))
}
