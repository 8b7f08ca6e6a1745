use crate::channel::{latest_frame_channel, LatestFrameReceiver, LatestFrameSender};
use crate::constants::{MAX_LINE_LENGTH, TERMINATOR_CAPACITY};
use crate::error::TofError;
use crate::frame::{decode_line, parse_frame};
use crate::serial::read_line;
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, trace};
use std::io::BufRead;
use std::thread::JoinHandle;
use tof_data::DistanceFrame;

/// Struct that contains the acquisition thread.
pub struct DriverThreads {
    pub(crate) reader_terminator_tx: Sender<bool>,
    pub(crate) reader_thread: Option<JoinHandle<()>>,
}

impl DriverThreads {
    /// False once the reader stopped, either on request or after a fatal transport error.
    pub fn is_running(&self) -> bool {
        self.reader_thread
            .as_ref()
            .map_or(false, |thread| !thread.is_finished())
    }
}

/// Starts the acquisition thread on an already opened transport.
///
/// Every valid frame of `n_zones` distances read from `reader` is published
/// to the returned receiver, which only ever holds the newest frame.
pub fn spawn_reader<R>(
    reader: R,
    n_zones: usize,
    transport_name: &str,
) -> Result<(DriverThreads, LatestFrameReceiver<DistanceFrame>), TofError>
where
    R: BufRead + Send + 'static,
{
    let (reader_terminator_tx, reader_terminator_rx) = bounded(TERMINATOR_CAPACITY);
    let (frame_tx, frame_rx) = latest_frame_channel::<DistanceFrame>();
    let transport_name = transport_name.to_string();

    let reader_thread = std::thread::Builder::new()
        .name("tof-reader".to_string())
        .spawn(move || {
            let mut reader = reader;
            match read_device_lines(&mut reader, n_zones, &frame_tx, &reader_terminator_rx) {
                Ok(()) => debug!("Stopped reading from \"{}\"", transport_name),
                Err(e) => error!("Serial error on \"{}\": {}", transport_name, e),
            }
        })?;

    let driver_threads = DriverThreads {
        reader_terminator_tx,
        reader_thread: Some(reader_thread),
    };
    Ok((driver_threads, frame_rx))
}

/// Reads lines until termination is requested or the transport fails.
///
/// Lines that are not valid frames are dropped here and never reach the channel.
pub(crate) fn read_device_lines<R: BufRead>(
    reader: &mut R,
    n_zones: usize,
    frame_tx: &LatestFrameSender<DistanceFrame>,
    reader_terminator_rx: &Receiver<bool>,
) -> Result<(), TofError> {
    let mut buffer = Vec::<u8>::new();
    let mut n_frames: usize = 0;
    let mut n_discarded: usize = 0;
    loop {
        if do_terminate(reader_terminator_rx) {
            debug!("{} frames published, {} lines discarded", n_frames, n_discarded);
            return Ok(());
        }

        let maybe_raw = read_line(reader, &mut buffer)?;
        if buffer.len() > MAX_LINE_LENGTH {
            // no newline in sight, this is noise
            trace!("Dropping {} bytes without a line break", buffer.len());
            buffer.clear();
        }
        let raw = match maybe_raw {
            Some(raw) => raw,
            None => continue,
        };

        let line = decode_line(&raw);
        if line.is_empty() {
            continue;
        }

        match parse_frame(&line, n_zones) {
            Ok(frame) => {
                frame_tx.publish(frame);
                n_frames += 1;
            }
            Err(rejection) => {
                trace!("Discarding line ({}): {}", rejection, line);
                n_discarded += 1;
            }
        }
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to stop and join the acquisition thread.
/// This function is automatically called when `driver_threads` is dropped.
pub fn join(driver_threads: &mut DriverThreads) {
    // The reader may already be gone after a transport error.
    let _ = driver_threads.reader_terminator_tx.send(true);

    if let Some(thread) = driver_threads.reader_thread.take() {
        if thread.join().is_err() {
            error!("The reader thread panicked");
        }
    }
}

impl Drop for DriverThreads {
    fn drop(&mut self) {
        join(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    fn read_all(input: &str, n_zones: usize) -> (Result<(), TofError>, Vec<DistanceFrame>) {
        let (frame_tx, frame_rx) = latest_frame_channel();
        let (_terminator_tx, terminator_rx) = bounded(1);
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let result = read_device_lines(&mut reader, n_zones, &frame_tx, &terminator_rx);
        (result, frame_rx.try_take_latest().into_iter().collect())
    }

    fn zeros_line(n: usize) -> String {
        format!("{{\"distances\":[{}]}}\n", vec!["0"; n].join(","))
    }

    #[test]
    fn test_valid_frame_is_published() {
        let (result, frames) = read_all(&zeros_line(64), 64);
        assert!(matches!(result, Err(TofError::Disconnected)));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].distances, vec![0.; 64]);
    }

    #[test]
    fn test_invalid_lines_are_dropped() {
        for line in [
            "garbage\n",
            "{\"distances\":[1,2,3]}\n",
            "{\"other\":1}\n",
            "\n\n   \r\n",
            "\u{1b}[0mESP-ROM:esp32s3-20210327\n",
        ] {
            let (result, frames) = read_all(line, 64);
            assert!(matches!(result, Err(TofError::Disconnected)));
            assert!(frames.is_empty());
        }
        let (_, frames) = read_all(&zeros_line(65), 64);
        assert!(frames.is_empty());
    }

    #[test]
    fn test_invalid_utf8_does_not_stop_reading() {
        let mut input = b"\xFF\xFE{broken\n".to_vec();
        input.extend_from_slice(zeros_line(4).as_bytes());
        let (frame_tx, frame_rx) = latest_frame_channel();
        let (_terminator_tx, terminator_rx) = bounded(1);
        let mut reader = Cursor::new(input);
        let result = read_device_lines(&mut reader, 4, &frame_tx, &terminator_rx);
        assert!(matches!(result, Err(TofError::Disconnected)));
        assert_eq!(frame_rx.try_take_latest().unwrap().distances, vec![0.; 4]);
    }

    #[test]
    fn test_newest_frame_wins() {
        let input = "{\"distances\":[1,1,1,1]}\nnoise\n{\"distances\":[2,2,2,2]}\n";
        let (_, frames) = read_all(input, 4);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].distances, vec![2.; 4]);
    }

    #[test]
    fn test_final_line_without_newline() {
        let (_, frames) = read_all("{\"distances\":[7,7,7,7]}", 4);
        assert_eq!(frames[0].distances, vec![7.; 4]);
    }

    /// Never sends a line break and asks the reader to stop once enough noise went out.
    struct StopAfterNoise {
        sent: usize,
        stop_after: usize,
        terminator_tx: Sender<bool>,
    }

    impl Read for StopAfterNoise {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.sent < self.stop_after && self.sent + buf.len() >= self.stop_after {
                self.terminator_tx.send(true).unwrap();
            }
            buf.fill(b'x');
            self.sent += buf.len();
            Ok(buf.len())
        }
    }

    #[test]
    fn test_endless_noise_is_dropped_and_stop_is_observed() {
        let (frame_tx, frame_rx) = latest_frame_channel();
        let (terminator_tx, terminator_rx) = bounded(1);
        let mut reader = BufReader::new(StopAfterNoise {
            sent: 0,
            stop_after: 8 * 1024,
            terminator_tx,
        });

        let result = read_device_lines(&mut reader, 4, &frame_tx, &terminator_rx);
        assert!(result.is_ok());
        assert!(frame_rx.try_take_latest().is_none());
        // a couple of BufReader refills at most, not the whole stream
        assert!(reader.get_ref().sent <= 4 * 8 * 1024);
    }

    #[test]
    fn test_terminate_before_reading() {
        let (frame_tx, frame_rx) = latest_frame_channel();
        let (terminator_tx, terminator_rx) = bounded(1);
        terminator_tx.send(true).unwrap();
        let mut reader = Cursor::new(zeros_line(4).into_bytes());
        let result = read_device_lines(&mut reader, 4, &frame_tx, &terminator_rx);
        assert!(result.is_ok());
        assert!(frame_rx.try_take_latest().is_none());
    }

    #[test]
    fn test_spawn_reader_stops_on_end_of_stream() {
        let reader = Cursor::new(zeros_line(4).into_bytes());
        let (threads, frame_rx) = spawn_reader(reader, 4, "cursor").unwrap();
        while threads.is_running() {
            std::thread::yield_now();
        }
        assert_eq!(frame_rx.try_take_latest().unwrap().distances, vec![0.; 4]);
        drop(threads);
    }
}
