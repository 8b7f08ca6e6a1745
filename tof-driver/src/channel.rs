use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Producer half of a single-slot channel that keeps only the newest item.
pub struct LatestFrameSender<T> {
    tx: Sender<T>,
    // Lets the producer evict a stale item when the slot is full.
    evict_rx: Receiver<T>,
}

/// Consumer half of a single-slot channel that keeps only the newest item.
pub struct LatestFrameReceiver<T> {
    rx: Receiver<T>,
}

/// Creates a capacity-1 channel with overwrite-on-full semantics.
///
/// Neither side ever blocks. Items move through the slot by value, so a
/// consumer can never see a partially written item.
pub fn latest_frame_channel<T>() -> (LatestFrameSender<T>, LatestFrameReceiver<T>) {
    let (tx, rx) = bounded(1);
    let sender = LatestFrameSender {
        tx,
        evict_rx: rx.clone(),
    };
    (sender, LatestFrameReceiver { rx })
}

impl<T> LatestFrameSender<T> {
    /// Installs `item` in the slot, discarding any unconsumed older item.
    pub fn publish(&self, item: T) {
        let mut item = item;
        loop {
            match self.tx.try_send(item) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    // The consumer may have emptied the slot in between; either way retry.
                    let _ = self.evict_rx.try_recv();
                    item = rejected;
                }
                // Unreachable while we hold `evict_rx`, but never block on it.
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }
}

impl<T> LatestFrameReceiver<T> {
    /// Takes the most recently published item, if any arrived since the last take.
    pub fn try_take_latest(&self) -> Option<T> {
        self.rx.try_iter().last()
    }
}
