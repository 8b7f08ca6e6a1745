use crate::channel::LatestFrameReceiver;
use crate::direction::DirectionTable;
use crate::numeric::normalize_clamped;
use tof_data::{DistanceFrame, ProjectedFrame, Vec3, ZoneSegment};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensorAxis {
    X,
    Y,
    Z,
}

/// Which sensor axis feeds each display axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayAxes {
    pub horizontal: SensorAxis,
    pub depth: SensorAxis,
    pub vertical: SensorAxis,
}

/// Fixed display convention: sensor x stays horizontal, the forward axis
/// becomes display depth (display y) and sensor y becomes display vertical
/// (display z).
pub const SENSOR_TO_DISPLAY: DisplayAxes = DisplayAxes {
    horizontal: SensorAxis::X,
    depth: SensorAxis::Z,
    vertical: SensorAxis::Y,
};

impl DisplayAxes {
    /// Maps a sensor point to display `(horizontal, depth, vertical)`.
    pub fn apply(&self, sensor: &Vec3) -> Vec3 {
        let pick = |axis: SensorAxis| match axis {
            SensorAxis::X => sensor.x,
            SensorAxis::Y => sensor.y,
            SensorAxis::Z => sensor.z,
        };
        Vec3::new(pick(self.horizontal), pick(self.depth), pick(self.vertical))
    }
}

/// Turns distance frames into per-zone segments ready for drawing.
pub struct Projector {
    table: DirectionTable,
    max_distance: f64,
    latest: Option<DistanceFrame>,
}

impl Projector {
    pub fn new(table: DirectionTable, max_distance: f64) -> Projector {
        Projector {
            table,
            max_distance,
            latest: None,
        }
    }

    pub fn table(&self) -> &DirectionTable {
        &self.table
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Last frame taken from the channel, if any arrived so far.
    pub fn latest(&self) -> Option<&DistanceFrame> {
        self.latest.as_ref()
    }

    /// Projects `frame`, or returns the idle state when there is none.
    pub fn project(&self, frame: Option<&DistanceFrame>) -> ProjectedFrame {
        let frame = match frame {
            Some(frame) if frame.len() == self.table.len() => frame,
            _ => return ProjectedFrame::idle(self.table.len()),
        };

        let segments = frame
            .distances
            .iter()
            .zip(self.table.iter())
            .map(|(d, direction)| ZoneSegment {
                origin: Vec3::ZERO,
                endpoint: SENSOR_TO_DISPLAY.apply(&direction.scale(*d)),
                color_scalar: normalize_clamped(*d, self.max_distance),
            })
            .collect();
        ProjectedFrame { segments }
    }

    /// Drains the channel down to the newest frame and projects the last
    /// known frame. The flag tells whether a new frame arrived since the
    /// previous tick.
    pub fn tick(&mut self, frame_rx: &LatestFrameReceiver<DistanceFrame>) -> (ProjectedFrame, bool) {
        let has_new_data = match frame_rx.try_take_latest() {
            Some(frame) => {
                self.latest = Some(frame);
                true
            }
            None => false,
        };
        (self.project(self.latest.as_ref()), has_new_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::latest_frame_channel;

    fn projector(max_distance: f64) -> Projector {
        Projector::new(DirectionTable::new(65., 8).unwrap(), max_distance)
    }

    #[test]
    fn test_axis_mapping() {
        let display = SENSOR_TO_DISPLAY.apply(&Vec3::new(1., 2., 3.));
        assert_eq!(display, Vec3::new(1., 3., 2.));
    }

    #[test]
    fn test_idle_without_frame() {
        let frame = projector(4000.).project(None);
        assert_eq!(frame.len(), 64);
        for segment in frame.segments.iter() {
            assert_eq!(segment.origin, Vec3::ZERO);
            assert_eq!(segment.endpoint, Vec3::ZERO);
        }
    }

    #[test]
    fn test_zero_distance_stays_at_origin() {
        let mut distances = vec![1000.; 64];
        distances[10] = 0.;
        let frame = projector(4000.).project(Some(&DistanceFrame::new(distances)));
        assert_eq!(frame.segments[10].endpoint, Vec3::ZERO);
        assert_eq!(frame.segments[10].color_scalar, 0.);
        assert!(frame.segments[11].endpoint.norm() > 0.);
    }

    #[test]
    fn test_color_scalar() {
        let mut distances = vec![0.; 64];
        distances[0] = 4000.;
        distances[1] = 8000.;
        distances[2] = 1000.;
        let frame = projector(4000.).project(Some(&DistanceFrame::new(distances)));
        assert_eq!(frame.segments[0].color_scalar, 1.);
        assert_eq!(frame.segments[1].color_scalar, 1.);
        assert_eq!(frame.segments[2].color_scalar, 0.25);
        assert_eq!(frame.segments[3].color_scalar, 0.);
    }

    #[test]
    fn test_non_positive_max_distance_saturates() {
        for max_distance in [0., -100.] {
            let frame = projector(max_distance).project(Some(&DistanceFrame::new(vec![5.; 64])));
            assert!(frame.segments.iter().all(|s| s.color_scalar == 1.));
        }
    }

    #[test]
    fn test_endpoints_follow_directions() {
        let p = projector(4000.);
        let frame = p.project(Some(&DistanceFrame::new(vec![100.; 64])));
        for (segment, direction) in frame.segments.iter().zip(p.table().iter()) {
            assert!(f64::abs(segment.endpoint.norm() - 100.) < 1e-9);
            assert!(f64::abs(segment.endpoint.x - 100. * direction.x) < 1e-9);
            assert!(f64::abs(segment.endpoint.y - 100. * direction.z) < 1e-9);
            assert!(f64::abs(segment.endpoint.z - 100. * direction.y) < 1e-9);
            // depth is always in front of the sensor
            assert!(segment.endpoint.y > 0.);
        }
        // top row is drawn above the bottom row
        assert!(frame.segments[0].endpoint.z > 0.);
        assert!(frame.segments[63].endpoint.z < 0.);
    }

    #[test]
    fn test_tick_keeps_last_known_frame() {
        let mut p = projector(4000.);
        let (tx, rx) = latest_frame_channel();

        let (frame, has_new_data) = p.tick(&rx);
        assert!(!has_new_data);
        assert_eq!(frame, ProjectedFrame::idle(64));

        tx.publish(DistanceFrame::new(vec![1.; 64]));
        tx.publish(DistanceFrame::new(vec![2000.; 64]));
        let (frame, has_new_data) = p.tick(&rx);
        assert!(has_new_data);
        assert!(frame.segments.iter().all(|s| s.color_scalar == 0.5));

        let (again, has_new_data) = p.tick(&rx);
        assert!(!has_new_data);
        assert_eq!(again, frame);
        assert_eq!(p.latest().unwrap().distances, vec![2000.; 64]);
    }
}
