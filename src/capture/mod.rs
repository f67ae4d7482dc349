//! Capture-source collaborator.
//!
//! `CaptureSource` is the contract the acquisition loop is written against.
//! `StreamSource` is the concrete implementation: a JSON-lines frame stream
//! read either from a live TCP bridge or from a recorded log file.

pub mod stream;
pub mod wire;

pub use stream::StreamSource;

use crate::models::{Frame, RawPose};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("not connected")]
    NotConnected,

    #[error("already connected to {0}")]
    AlreadyConnected(String),

    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error("connection to {address} failed: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("stream read failed: {0}")]
    Read(#[from] io::Error),

    #[error("malformed frame on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A finite source (replay) has delivered all of its frames.
    #[error("no more frames")]
    Exhausted,
}

/// Precision of the data requested from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectMode {
    #[default]
    Full,
    /// Reduced-precision segment data.
    Lightweight,
}

impl ConnectMode {
    pub fn from_flag(lightweight: bool) -> Self {
        if lightweight {
            ConnectMode::Lightweight
        } else {
            ConnectMode::Full
        }
    }
}

pub trait CaptureSource {
    fn connect(&mut self, address: &str, mode: ConnectMode) -> Result<(), CaptureError>;

    /// Blocks until a frame newer than the last one returned is available.
    fn next_unread_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Raw pose of `name` in `frame`, or `None` when the source did not
    /// report the object at all in that tick.
    fn resolve_object(&self, frame: &Frame, name: &str) -> Option<RawPose> {
        frame.object(name).copied()
    }

    fn disconnect(&mut self) -> Result<(), CaptureError>;
}
