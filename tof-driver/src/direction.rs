use crate::config::{validate_geometry, SensorConfig};
use crate::error::TofError;
use crate::numeric::{degree_to_radian, linspace};
use tof_data::Vec3;

/// Per-zone unit direction vectors in sensor coordinates.
///
/// Sensor coordinates follow a pinhole camera: `x` to the right, `y` up and
/// `z` forward along the optical axis. Vectors are ordered row-major with the
/// top row first, the same order the sensor reports its zones in.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionTable {
    fov_degrees: f64,
    grid_size: usize,
    directions: Vec<Vec3>,
}

impl DirectionTable {
    /// Builds the table for a sensor with full field of view `fov_degrees`
    /// and `grid_size * grid_size` zones.
    ///
    /// Each zone is placed on a normalized image plane spanning [-1, 1] on
    /// both axes. Scaling by the half-angle tangent gives the lateral spread
    /// at unit depth, and `(tan_x, tan_y, 1)` is normalized to unit length.
    pub fn new(fov_degrees: f64, grid_size: usize) -> Result<DirectionTable, TofError> {
        validate_geometry(fov_degrees, grid_size)?;

        let half_tan = f64::tan(degree_to_radian(fov_degrees) / 2.);
        let u = linspace(-1., 1., grid_size);
        // top to bottom
        let v = linspace(1., -1., grid_size);

        let directions = v
            .iter()
            .flat_map(|v| u.iter().map(move |u| (*u, *v)))
            .map(|(u, v)| {
                let tan_x = u * half_tan;
                let tan_y = v * half_tan;
                let norm = f64::sqrt(tan_x * tan_x + tan_y * tan_y + 1.);
                Vec3::new(tan_x / norm, tan_y / norm, 1. / norm)
            })
            .collect();

        Ok(DirectionTable {
            fov_degrees,
            grid_size,
            directions,
        })
    }

    pub fn from_config(config: &SensorConfig) -> Result<DirectionTable, TofError> {
        DirectionTable::new(config.fov_degrees, config.grid_size)
    }

    pub fn fov_degrees(&self) -> f64 {
        self.fov_degrees
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    pub fn get(&self, zone: usize) -> Option<&Vec3> {
        self.directions.get(zone)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.directions.iter()
    }
}
