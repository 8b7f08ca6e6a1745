use crate::channel::LatestFrameReceiver;
use crate::projector::Projector;
use crossbeam_channel::{select, tick, Receiver};
use std::time::Duration;
use tof_data::{DistanceFrame, ProjectedFrame};

/// Consumer of projected frames, called once per render tick.
pub trait RenderSink {
    fn render(&mut self, frame: &ProjectedFrame, has_new_data: bool);
}

impl<F> RenderSink for F
where
    F: FnMut(&ProjectedFrame, bool),
{
    fn render(&mut self, frame: &ProjectedFrame, has_new_data: bool) {
        self(frame, has_new_data)
    }
}

/// Axis limits of the display volume, in the same units as the distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBounds {
    pub horizontal: (f64, f64),
    pub depth: (f64, f64),
    pub vertical: (f64, f64),
}

impl ViewBounds {
    pub fn from_max_distance(max_distance: f64) -> ViewBounds {
        let half = max_distance / 2.;
        ViewBounds {
            horizontal: (-half, half),
            depth: (0., max_distance),
            vertical: (-half, half),
        }
    }
}

/// Drives `projector` on a fixed cadence until `terminator_rx` fires or disconnects.
///
/// A tick never waits for data. Without a new frame the sink receives the
/// last known state again, with `has_new_data` unset.
pub fn render_loop<S: RenderSink>(
    projector: &mut Projector,
    frame_rx: &LatestFrameReceiver<DistanceFrame>,
    sink: &mut S,
    interval: Duration,
    terminator_rx: &Receiver<bool>,
) {
    let ticker = tick(interval);
    loop {
        select! {
            recv(ticker) -> _ => {
                let (frame, has_new_data) = projector.tick(frame_rx);
                sink.render(&frame, has_new_data);
            }
            recv(terminator_rx) -> _ => return,
        }
    }
}
