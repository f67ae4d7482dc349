use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Write-once stop latch shared between the session and whoever may end it
/// (the operator listener, the Ctrl+C handler).
///
/// Clones share the same latch. It is never reset; a new session makes a
/// new signal.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal {
    flag: Arc<AtomicBool>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blocking; cheap enough to call every frame.
    pub fn check(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Set the latch. Returns `true` only for the call that actually set it;
    /// later calls are no-ops.
    pub fn trigger(&self) -> bool {
        !self.flag.swap(true, Ordering::AcqRel)
    }
}
