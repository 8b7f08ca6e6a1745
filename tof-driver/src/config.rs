use crate::constants::{
    DEFAULT_BAUD_RATE, DEFAULT_FOV_DEGREES, DEFAULT_GRID_SIZE, DEFAULT_MAX_DISTANCE,
    DEFAULT_PORT_NAME, MAX_GRID_SIZE,
};
use crate::error::TofError;

/// Static configuration supplied once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorConfig {
    /// Serial port name such as `/dev/ttyUSB0` or `COM5`.
    pub port_name: String,
    pub baud_rate: u32,
    /// Full field of view of the sensor in degrees.
    pub fov_degrees: f64,
    /// Zones per side. The sensor reports `grid_size * grid_size` zones.
    pub grid_size: usize,
    /// Distance mapped to the top of the color scale.
    pub max_distance: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            port_name: DEFAULT_PORT_NAME.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            fov_degrees: DEFAULT_FOV_DEGREES,
            grid_size: DEFAULT_GRID_SIZE,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

impl SensorConfig {
    pub fn n_zones(&self) -> usize {
        self.grid_size.saturating_mul(self.grid_size)
    }

    pub fn validate(&self) -> Result<(), TofError> {
        validate_geometry(self.fov_degrees, self.grid_size)
    }
}

pub(crate) fn validate_geometry(fov_degrees: f64, grid_size: usize) -> Result<(), TofError> {
    if grid_size == 0 || grid_size > MAX_GRID_SIZE {
        return Err(TofError::InvalidGridSize(grid_size));
    }
    // NaN fails both comparisons
    if !(fov_degrees > 0. && fov_degrees < 180.) {
        return Err(TofError::InvalidFieldOfView(fov_degrees));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SensorConfig::default();
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.n_zones(), 64);
        assert_eq!(config.fov_degrees, 65.);
        assert_eq!(config.max_distance, 4000.);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let config = SensorConfig {
            grid_size: 0,
            ..SensorConfig::default()
        };
        assert!(matches!(config.validate(), Err(TofError::InvalidGridSize(0))));

        for grid_size in [65, 1_000_000, usize::MAX] {
            let config = SensorConfig {
                grid_size,
                ..SensorConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(TofError::InvalidGridSize(n)) if n == grid_size
            ));
            // no overflow panic before validation
            assert!(config.n_zones() >= 65 * 65);
        }
        let config = SensorConfig {
            grid_size: 64,
            ..SensorConfig::default()
        };
        assert!(config.validate().is_ok());

        for fov in [0., 180., -10., 270., f64::NAN] {
            let config = SensorConfig {
                fov_degrees: fov,
                ..SensorConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(TofError::InvalidFieldOfView(_))
            ));
        }

        let config = SensorConfig {
            fov_degrees: 179.9,
            grid_size: 4,
            ..SensorConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
