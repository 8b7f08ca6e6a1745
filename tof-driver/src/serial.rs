use crate::constants::{MAX_LINE_LENGTH, SERIAL_READ_TIMEOUT_MS};
use crate::error::TofError;
use serialport::SerialPort;
use std::io::{self, BufRead, Read};
use std::time::Duration;

pub(crate) fn open_port(port_name: &str, baud_rate: u32) -> Result<Box<dyn SerialPort>, TofError> {
    let port = serialport::new(port_name, baud_rate)
        .timeout(Duration::from_millis(SERIAL_READ_TIMEOUT_MS))
        .open()?;
    Ok(port)
}

/// Errors after which the transport is still usable.
fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

/// Reads towards the next newline, accumulating into `buffer`.
///
/// Returns the complete raw line once its newline arrived, or `None` when the
/// read timed out first or `buffer` grew past `MAX_LINE_LENGTH` without a
/// newline. Each call reads at most one byte beyond that limit, so the caller
/// regains control even on a port that never pauses. Bytes of a partial line
/// stay in `buffer` for the next call. A trailing unterminated line is handed
/// out at end of stream, after which `TofError::Disconnected` is returned.
pub(crate) fn read_line<R: BufRead>(
    reader: &mut R,
    buffer: &mut Vec<u8>,
) -> Result<Option<Vec<u8>>, TofError> {
    // at least one byte, so Ok(0) below always means end of stream
    let limit = (MAX_LINE_LENGTH + 1).saturating_sub(buffer.len()).max(1);
    match Read::take(&mut *reader, limit as u64).read_until(b'\n', buffer) {
        Ok(0) if buffer.is_empty() => Err(TofError::Disconnected),
        Ok(0) => Ok(Some(std::mem::take(buffer))),
        Ok(_) if buffer.ends_with(b"\n") => Ok(Some(std::mem::take(buffer))),
        Ok(_) => Ok(None),
        Err(e) if is_transient(&e) => Ok(None),
        Err(e) => Err(TofError::IoError(e)),
    }
}
