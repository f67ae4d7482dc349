pub mod acquisition;
pub mod cancel;
pub mod codec;
pub mod config;
pub mod listener;
pub mod session;

pub use cancel::CancellationSignal;
pub use session::{SessionConfig, SessionOutcome, SessionReport, SessionState, run_session, run_session_with};
