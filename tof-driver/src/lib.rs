mod channel;
pub mod colormap;
mod config;
mod constants;
mod direction;
mod driver_threads;
mod error;
mod frame;
mod numeric;
mod projector;
mod render;
mod serial;
#[cfg(test)]
mod time;

use crate::serial::open_port;
use log::{error, info};
use std::io::BufReader;
use tof_data::DistanceFrame;

pub use crate::channel::{latest_frame_channel, LatestFrameReceiver, LatestFrameSender};
pub use crate::config::SensorConfig;
pub use crate::constants::RENDER_INTERVAL_MS;
pub use crate::direction::DirectionTable;
pub use crate::driver_threads::{join, spawn_reader, DriverThreads};
pub use crate::error::TofError;
pub use crate::projector::{DisplayAxes, Projector, SensorAxis, SENSOR_TO_DISPLAY};
pub use crate::render::{render_loop, RenderSink, ViewBounds};

/// Function to launch the time-of-flight sensor reader.
///
/// Opens the serial port named in `config` and starts the acquisition thread.
/// The returned receiver always holds only the newest valid frame.
/// Failing to open the port is fatal and is not retried.
///
/// # Arguments
///
/// * `config` - Port name, baud rate and grid geometry of the sensor.
pub fn run_driver(
    config: &SensorConfig,
) -> Result<(DriverThreads, LatestFrameReceiver<DistanceFrame>), TofError> {
    config.validate()?;

    let port = match open_port(&config.port_name, config.baud_rate) {
        Ok(port) => port,
        Err(e) => {
            error!("Failed to open \"{}\". Error: {}", config.port_name, e);
            return Err(e);
        }
    };
    info!("Connected to {}", config.port_name);

    spawn_reader(BufReader::new(port), config.n_zones(), &config.port_name)
}
