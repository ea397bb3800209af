pub mod pose;
pub mod waypoint;

pub use pose::Pose;
pub use waypoint::{Target, Waypoint};
