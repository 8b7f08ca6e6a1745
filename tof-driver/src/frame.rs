use crate::constants::{FRAME_END, FRAME_START};
use std::fmt;
use tof_data::DistanceFrame;

/// Reason a line from the transport did not become a frame.
/// These never leave the acquisition thread.
#[derive(Debug, PartialEq)]
pub(crate) enum FrameRejection {
    NotACandidate,
    Malformed,
    WrongLength(usize, usize),
    InvalidDistance(usize),
}

impl fmt::Display for FrameRejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FrameRejection::NotACandidate => write!(f, "not a JSON object"),
            FrameRejection::Malformed => write!(f, "no numeric distances array"),
            FrameRejection::WrongLength(expected, actual) => write!(f, "expected {} distances, found {}", expected, actual),
            FrameRejection::InvalidDistance(index) => write!(f, "invalid distance at zone {}", index),
        }
    }
}

/// Decodes raw bytes of one line, replacing invalid UTF-8 instead of failing.
pub(crate) fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_string()
}

pub(crate) fn is_frame_candidate(line: &str) -> bool {
    let line = line.trim();
    line.starts_with(FRAME_START) && line.ends_with(FRAME_END)
}

/// Parses one trimmed line into a frame of exactly `n_zones` distances.
///
/// The line has to be a JSON object with a `distances` array. Unknown fields
/// are ignored.
pub(crate) fn parse_frame(line: &str, n_zones: usize) -> Result<DistanceFrame, FrameRejection> {
    if !is_frame_candidate(line) {
        return Err(FrameRejection::NotACandidate);
    }
    let frame: DistanceFrame =
        serde_json::from_str(line).map_err(|_| FrameRejection::Malformed)?;
    validate_frame(&frame, n_zones)?;
    Ok(frame)
}

fn validate_frame(frame: &DistanceFrame, n_zones: usize) -> Result<(), FrameRejection> {
    if frame.len() != n_zones {
        return Err(FrameRejection::WrongLength(n_zones, frame.len()));
    }
    match frame
        .distances
        .iter()
        .position(|d| !d.is_finite() || *d < 0.)
    {
        Some(index) => Err(FrameRejection::InvalidDistance(index)),
        None => Ok(()),
    }
}
