use crate::constants::MAX_GRID_SIZE;
use std::error::Error;
use std::fmt::Display;
use std::{fmt, io};

#[derive(Debug)]
pub enum TofError {
    InvalidGridSize(usize),
    InvalidFieldOfView(f64),
    Disconnected,
    SerialError(serialport::Error),
    IoError(io::Error),
}

impl fmt::Display for TofError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TofError::InvalidGridSize(n) => write!(f, "Grid size must be between 1 and {}. Actually {}.", MAX_GRID_SIZE, n),
            TofError::InvalidFieldOfView(fov) => write!(f, "Field of view must lie strictly between 0 and 180 degrees. Actually {}.", fov),
            TofError::Disconnected => write!(f, "The transport reached end of stream"),
            TofError::IoError(err) => Display::fmt(&err, f),
            TofError::SerialError(err) => Display::fmt(&err, f),
        }
    }
}

impl Error for TofError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TofError::IoError(err) => Some(err),
            TofError::SerialError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TofError {
    fn from(err: io::Error) -> Self {
        TofError::IoError(err)
    }
}

impl From<serialport::Error> for TofError {
    fn from(err: serialport::Error) -> Self {
        TofError::SerialError(err)
    }
}
