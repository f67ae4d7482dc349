//! Line format shared by the live bridge and recorded logs:
//!
//! ```text
//! {"frame": 12, "time": 1.25, "objects": {"hk_test": {"position": [1, 2, 3], "orientation": [1, 0, 0, 0]}}}
//! ```
//!
//! `null` components are how the source reports an occluded object; they
//! decode to NaN so the codec sees exactly what a live link would deliver.

use crate::capture::{CaptureError, ConnectMode};
use crate::models::{Frame, RawPose};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize, Debug)]
struct WireFrame {
    frame: u64,
    time: f64,
    #[serde(default)]
    objects: BTreeMap<String, WireObject>,
}

#[derive(Deserialize, Debug)]
struct WireObject {
    position: [Option<f64>; 3],
    orientation: [Option<f64>; 4],
}

/// Parse one non-empty line into a frame.
pub fn parse_frame(line: &str, line_no: usize, mode: ConnectMode) -> Result<Frame, CaptureError> {
    let wire: WireFrame =
        serde_json::from_str(line).map_err(|e| CaptureError::Malformed {
            line: line_no,
            reason: e.to_string(),
        })?;

    let mut frame = Frame::new(wire.frame, wire.time);
    for (name, obj) in wire.objects {
        let pose = RawPose::new(
            obj.position.map(|c| component(c, mode)),
            obj.orientation.map(|c| component(c, mode)),
        );
        frame.objects.insert(name, pose);
    }

    Ok(frame)
}

fn component(value: Option<f64>, mode: ConnectMode) -> f64 {
    match (value, mode) {
        (None, _) => f64::NAN,
        (Some(v), ConnectMode::Full) => v,
        (Some(v), ConnectMode::Lightweight) => v as f32 as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_decode_as_nan() {
        let line = r#"{"frame":3,"time":0.5,"objects":{"a":{"position":[null,null,null],"orientation":[1,0,0,0]}}}"#;
        let frame = parse_frame(line, 1, ConnectMode::Full).unwrap();
        let pose = frame.object("a").unwrap();
        assert!(pose.position.iter().all(|c| c.is_nan()));
        assert_eq!(pose.orientation, [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn wrong_arity_is_malformed() {
        let line = r#"{"frame":3,"time":0.5,"objects":{"a":{"position":[1,2],"orientation":[1,0,0,0]}}}"#;
        let err = parse_frame(line, 7, ConnectMode::Full).unwrap_err();
        assert!(matches!(err, CaptureError::Malformed { line: 7, .. }));
    }

    #[test]
    fn lightweight_rounds_to_single_precision() {
        let line = r#"{"frame":1,"time":0.0,"objects":{"a":{"position":[0.1,0,0],"orientation":[1,0,0,0]}}}"#;
        let frame = parse_frame(line, 1, ConnectMode::Lightweight).unwrap();
        assert_eq!(frame.object("a").unwrap().position[0], 0.1f32 as f64);
    }

    #[test]
    fn lightweight_out_of_range_pose_stays_visible() {
        let line = r#"{"frame":1,"time":0.0,"objects":{"a":{"position":[1e39,-1e39,0],"orientation":[1,0,0,0]}}}"#;
        let frame = parse_frame(line, 1, ConnectMode::Lightweight).unwrap();
        let sample = crate::core::codec::decode_raw(frame.object("a").unwrap());
        assert!(!sample.position.is_occluded());
    }
}
