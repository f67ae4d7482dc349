use crate::models::pose::RawPose;
use std::collections::BTreeMap;

/// One sampling tick as delivered by the capture source.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Monotonically increasing tick counter of the source.
    pub frame_number: u64,
    /// Capture instant in seconds, on the source clock.
    pub capture_time: f64,
    /// Raw poses of every object the source reported in this tick.
    pub objects: BTreeMap<String, RawPose>,
}

impl Frame {
    pub fn new(frame_number: u64, capture_time: f64) -> Self {
        Self {
            frame_number,
            capture_time,
            objects: BTreeMap::new(),
        }
    }

    /// Builder helper used by sources and tests.
    pub fn with_object(mut self, name: impl Into<String>, pose: RawPose) -> Self {
        self.objects.insert(name.into(), pose);
        self
    }

    pub fn object(&self, name: &str) -> Option<&RawPose> {
        self.objects.get(name)
    }
}
