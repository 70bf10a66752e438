//! Event sinks fed by the interceptor as calls enter and exit.
//!
//! Collecting incrementally is what keeps a partial trace available when the
//! traced function fails half-way.

use crossbeam_channel::{bounded, Receiver, Sender};
use log::debug;

use crate::domain::TraceEvent;

/// Channel capacity for live streaming
pub const CHANNEL_CAPACITY: usize = 1000;

/// Destination for trace events, in emission order.
///
/// Sinks are handed to the tracer thread, hence `Send`.
pub trait TraceSink: Send {
    fn record(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Streams events to another thread (live printing, TUI feeds)
pub struct ChannelSink {
    tx: Sender<TraceEvent>,
    dropped: usize,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its bounded channel
    #[must_use]
    pub fn bounded() -> (Self, Receiver<TraceEvent>) {
        let (tx, rx) = bounded(CHANNEL_CAPACITY);
        (Self { tx, dropped: 0 }, rx)
    }

    /// Events that could not be delivered because the receiver went away
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl TraceSink for ChannelSink {
    fn record(&mut self, event: TraceEvent) {
        if self.tx.send(event).is_err() {
            if self.dropped == 0 {
                debug!("trace receiver disconnected, discarding further events");
            }
            self.dropped += 1;
        }
    }
}
