use clap::Parser;
use crossbeam_channel::bounded;
use std::io::Write;
use std::time::Duration;
use tof_data::ProjectedFrame;
use tof_driver::colormap::turbo;
use tof_driver::{
    render_loop, run_driver, DirectionTable, Projector, RenderSink, SensorConfig, ViewBounds,
    RENDER_INTERVAL_MS,
};

#[derive(Parser, Debug)]
#[command(about = "Reads a multi-zone ToF sensor and shows the live vector cloud.")]
struct Args {
    /// The device path to a serial port
    port: String,
    #[arg(long, default_value_t = 115200)]
    baud_rate: u32,
    /// Full field of view in degrees
    #[arg(long, default_value_t = 65.)]
    fov: f64,
    /// Zones per side of the sensor grid
    #[arg(long, default_value_t = 8)]
    grid_size: usize,
    /// Distance shown at the far end of the color scale (mm)
    #[arg(long, default_value_t = 4000.)]
    max_distance: f64,
    #[arg(long, default_value_t = RENDER_INTERVAL_MS)]
    interval_ms: u64,
}

/// Draws the zone grid in the terminal, one colored cell per zone.
struct TerminalSink {
    grid_size: usize,
    bounds: ViewBounds,
    frames_drawn: usize,
}

impl RenderSink for TerminalSink {
    fn render(&mut self, frame: &ProjectedFrame, has_new_data: bool) {
        if !has_new_data {
            if self.frames_drawn == 0 {
                print!("\x1b[H\x1b[2JWaiting for data...\r");
                let _ = std::io::stdout().flush();
            }
            return;
        }

        let mut out = String::from("\x1b[H\x1b[2J");
        for row in frame.segments.chunks(self.grid_size) {
            for segment in row {
                let [r, g, b] = turbo(segment.color_scalar);
                let distance = segment.endpoint.norm();
                out.push_str(&format!("\x1b[48;2;{};{};{}m{:>6.0}\x1b[0m", r, g, b, distance));
            }
            out.push('\n');
        }
        let nearest = frame
            .segments
            .iter()
            .map(|s| s.endpoint.y)
            .filter(|depth| *depth > 0.)
            .fold(f64::INFINITY, f64::min);
        out.push_str(&format!(
            "nearest depth: {:.0} mm (view depth {:.0}..{:.0} mm)\n",
            nearest, self.bounds.depth.0, self.bounds.depth.1
        ));
        print!("{}", out);
        let _ = std::io::stdout().flush();
        self.frames_drawn += 1;
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = SensorConfig {
        port_name: args.port,
        baud_rate: args.baud_rate,
        fov_degrees: args.fov,
        grid_size: args.grid_size,
        max_distance: args.max_distance,
    };

    let table = match DirectionTable::from_config(&config) {
        Ok(table) => table,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let (driver_threads, frame_rx) = match run_driver(&config) {
        Ok(t) => t,
        Err(_) => std::process::exit(1),
    };

    let (terminator_tx, terminator_rx) = bounded(1);
    ctrlc::set_handler(move || {
        let _ = terminator_tx.try_send(true);
    })
    .expect("Unable to install the Ctrl-C handler");

    let mut projector = Projector::new(table, config.max_distance);
    let mut sink = TerminalSink {
        grid_size: config.grid_size,
        bounds: ViewBounds::from_max_distance(config.max_distance),
        frames_drawn: 0,
    };
    render_loop(
        &mut projector,
        &frame_rx,
        &mut sink,
        Duration::from_millis(args.interval_ms),
        &terminator_rx,
    );

    drop(driver_threads);
}
