pub mod frame;
pub mod pose;
pub mod row;

pub use frame::Frame;
pub use pose::{PoseSample, RawPose, Tracked};
pub use row::{Cell, HEADERS, SessionRow};
