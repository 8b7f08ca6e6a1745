pub mod cloud;
pub mod frame;

pub use cloud::{ProjectedFrame, Vec3, ZoneSegment};
pub use frame::DistanceFrame;
