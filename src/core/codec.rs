//! Raw tracking sample → typed pose, with occlusion made explicit.
//!
//! The capture source reports an occluded object by filling its components
//! with NaN. That pattern is recognised here, once, and nowhere else.

use crate::models::{PoseSample, RawPose, Tracked};

pub fn decode(position: [f64; 3], orientation: [f64; 4]) -> PoseSample {
    PoseSample {
        position: track(position),
        orientation: track(orientation),
    }
}

pub fn decode_raw(raw: &RawPose) -> PoseSample {
    decode(raw.position, raw.orientation)
}

/// Any NaN component hides the whole field. Infinities are values, not gaps.
fn track<const N: usize>(components: [f64; N]) -> Tracked<[f64; N]> {
    if components.iter().any(|c| c.is_nan()) {
        Tracked::Occluded
    } else {
        Tracked::Visible(components)
    }
}
