/// Pose of one object exactly as the capture source reported it.
/// Occluded components arrive as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPose {
    pub position: [f64; 3],
    /// Unit quaternion, scalar first (qw, qx, qy, qz).
    pub orientation: [f64; 4],
}

impl RawPose {
    pub fn new(position: [f64; 3], orientation: [f64; 4]) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// A vector field that is either known or hidden from the sensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tracked<T> {
    Visible(T),
    Occluded,
}

impl<T> Tracked<T> {
    pub fn is_occluded(&self) -> bool {
        matches!(self, Tracked::Occluded)
    }

    pub fn visible(&self) -> Option<&T> {
        match self {
            Tracked::Visible(v) => Some(v),
            Tracked::Occluded => None,
        }
    }
}

/// Decoded, occlusion-aware pose for one object in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    pub position: Tracked<[f64; 3]>,
    pub orientation: Tracked<[f64; 4]>,
}

impl PoseSample {
    /// Sample used when the object is hidden, or missing from the frame.
    pub fn occluded() -> Self {
        Self {
            position: Tracked::Occluded,
            orientation: Tracked::Occluded,
        }
    }

    pub fn is_fully_occluded(&self) -> bool {
        self.position.is_occluded() && self.orientation.is_occluded()
    }
}
