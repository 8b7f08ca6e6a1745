pub(crate) const DEFAULT_PORT_NAME: &str = "/dev/ttyUSB0";
pub(crate) const DEFAULT_BAUD_RATE: u32 = 115200;
pub(crate) const DEFAULT_FOV_DEGREES: f64 = 65.;
pub(crate) const DEFAULT_GRID_SIZE: usize = 8;
// Largest supported grid side, 4096 zones.
pub(crate) const MAX_GRID_SIZE: usize = 64;
pub(crate) const DEFAULT_MAX_DISTANCE: f64 = 4000.;
// Bounds a blocking read so the reader can observe termination.
pub(crate) const SERIAL_READ_TIMEOUT_MS: u64 = 100;
pub(crate) const MAX_LINE_LENGTH: usize = 4096;
pub(crate) const TERMINATOR_CAPACITY: usize = 10;
pub const RENDER_INTERVAL_MS: u64 = 50;
pub(crate) const FRAME_START: char = '{';
pub(crate) const FRAME_END: char = '}';
