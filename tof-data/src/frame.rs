#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One complete set of per-zone distance readings.
///
/// Zones are ordered row-major, top row first, exactly as the sensor emits
/// them. A frame only exists once it has been validated, so `distances`
/// always holds one entry per zone.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistanceFrame {
    /// Distance to an object for each zone, in raw sensor units (mm).
    pub distances: Vec<f64>,
}

impl DistanceFrame {
    pub fn new(distances: Vec<f64>) -> DistanceFrame {
        DistanceFrame { distances }
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
