use clap::Parser;
use std::time::Duration;
use tof_driver::{run_driver, SensorConfig, RENDER_INTERVAL_MS};

#[derive(Parser, Debug)]
#[command(about = "Reads a multi-zone ToF sensor and prints each new frame as JSON.")]
struct Args {
    /// The device path to a serial port
    port: String,
    #[arg(long, default_value_t = 115200)]
    baud_rate: u32,
    /// Zones per side of the sensor grid
    #[arg(long, default_value_t = 8)]
    grid_size: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = SensorConfig {
        port_name: args.port,
        baud_rate: args.baud_rate,
        grid_size: args.grid_size,
        ..SensorConfig::default()
    };
    let (driver_threads, frame_rx) = match run_driver(&config) {
        Ok(t) => t,
        Err(_) => std::process::exit(1),
    };

    while driver_threads.is_running() {
        if let Some(frame) = frame_rx.try_take_latest() {
            match serde_json::to_string(&frame) {
                Ok(json) => println!("{}", json),
                Err(e) => log::warn!("{}", e),
            }
        }
        std::thread::sleep(Duration::from_millis(RENDER_INTERVAL_MS));
    }

    drop(driver_threads);
}
