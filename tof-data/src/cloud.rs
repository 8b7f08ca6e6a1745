#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cartesian triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.,
        y: 0.,
        z: 0.,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn scale(&self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Segment drawn for a single zone, from the sensor origin to the measured point.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneSegment {
    /// Always the sensor origin.
    pub origin: Vec3,
    /// Measured point in display coordinates.
    pub endpoint: Vec3,
    /// Distance normalized by the configured max distance, in [0, 1].
    pub color_scalar: f64,
}

impl ZoneSegment {
    pub fn idle() -> ZoneSegment {
        ZoneSegment {
            origin: Vec3::ZERO,
            endpoint: Vec3::ZERO,
            color_scalar: 0.,
        }
    }
}

/// Struct to hold the projected vector cloud of one frame.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectedFrame {
    /// One segment per zone, index-aligned with the distance frame.
    pub segments: Vec<ZoneSegment>,
}

impl ProjectedFrame {
    /// Frame shown before any data arrives: every segment collapsed onto the origin.
    pub fn idle(n_zones: usize) -> ProjectedFrame {
        ProjectedFrame {
            segments: vec![ZoneSegment::idle(); n_zones],
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
