//! Trace log models
//!
//! This module contains the trace produced by one instrumented run, both as
//! the immutable log handed to playback and as a live log that grows while
//! events stream in from a running tracer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

use crate::domain::{CallEvent, CallId, ExportError, TraceEvent, Value};

/// Ordered call/return log of one instrumented run (immutable once produced)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    #[must_use]
    pub fn new(events: Vec<TraceEvent>) -> Self {
        Self { events }
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TraceEvent> {
        self.events.get(index)
    }

    /// Index of the final event, `None` for an empty trace
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.events.len().checked_sub(1)
    }

    /// Number of call events (the sampler's operation count)
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_call()).count()
    }

    #[must_use]
    pub fn return_count(&self) -> usize {
        self.events.len() - self.call_count()
    }

    /// Position of the call event carrying `id`
    #[must_use]
    pub fn call_index(&self, id: CallId) -> Option<usize> {
        self.events.iter().position(|e| matches!(e, TraceEvent::Call(c) if c.id == id))
    }

    /// Call event carrying `id`
    #[must_use]
    pub fn call(&self, id: CallId) -> Option<&CallEvent> {
        self.events.iter().filter_map(TraceEvent::as_call).find(|c| c.id == id)
    }

    /// Value returned by the root call, if it returned
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        let root = self.events.iter().filter_map(TraceEvent::as_call).find(|c| c.parent_id.is_none())?;
        self.events
            .iter()
            .filter_map(TraceEvent::as_return)
            .find(|r| r.id == root.id)
            .map(|r| &r.value)
    }

    /// Parse a trace file written by [`Trace::to_writer`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open trace file {}", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("Failed to parse trace file {}", path.display()))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write the trace as pretty-printed JSON
    pub fn to_writer(&self, writer: impl Write) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl From<Vec<TraceEvent>> for Trace {
    fn from(events: Vec<TraceEvent>) -> Self {
        Self::new(events)
    }
}

/// Live trace that grows as events arrive from a streaming tracer
#[derive(Debug, Default)]
pub struct LiveTrace {
    events: Vec<TraceEvent>,
    open_calls: Vec<CallId>,
}

impl LiveTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new event to the live trace
    pub fn add_event(&mut self, event: TraceEvent) {
        match &event {
            TraceEvent::Call(call) => self.open_calls.push(call.id),
            TraceEvent::Return(ret) => {
                if self.open_calls.last() == Some(&ret.id) {
                    self.open_calls.pop();
                }
            }
        }
        self.events.push(event);
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of calls currently in progress
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open_calls.len()
    }

    /// Freeze into an immutable trace
    #[must_use]
    pub fn into_trace(self) -> Trace {
        Trace::new(self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReturnEvent;

    fn call(id: u64, parent: Option<u64>, n: i64) -> TraceEvent {
        TraceEvent::Call(CallEvent {
            id: CallId(id),
            parent_id: parent.map(CallId),
            function_name: "f".to_string(),
            arguments: vec![Value::Int(n)],
        })
    }

    fn ret(id: u64, v: i64) -> TraceEvent {
        TraceEvent::Return(ReturnEvent { id: CallId(id), value: Value::Int(v) })
    }

    #[test]
    fn test_counts_and_lookup() {
        let trace = Trace::new(vec![call(0, None, 2), call(1, Some(0), 1), ret(1, 1), ret(0, 2)]);
        assert_eq!(trace.call_count(), 2);
        assert_eq!(trace.return_count(), 2);
        assert_eq!(trace.call_index(CallId(1)), Some(1));
        assert_eq!(trace.call_index(CallId(9)), None);
        assert_eq!(trace.last_index(), Some(3));
        assert_eq!(trace.result(), Some(&Value::Int(2)));
    }

    #[test]
    fn test_result_missing_when_root_never_returned() {
        let trace = Trace::new(vec![call(0, None, 2), call(1, Some(0), 1), ret(1, 1)]);
        assert_eq!(trace.result(), None);
        assert_eq!(Trace::default().last_index(), None);
    }

    #[test]
    fn test_live_trace_tracks_depth() {
        let mut live = LiveTrace::new();
        live.add_event(call(0, None, 2));
        live.add_event(call(1, Some(0), 1));
        assert_eq!(live.depth(), 2);
        live.add_event(ret(1, 1));
        assert_eq!(live.depth(), 1);
        assert_eq!(live.event_count(), 3);
        assert_eq!(live.into_trace().len(), 3);
    }

    #[test]
    fn test_json_round_trip_through_writer() {
        let trace = Trace::new(vec![call(0, None, 1), ret(0, 1)]);
        let mut buffer = Vec::new();
        trace.to_writer(&mut buffer).unwrap();
        let parsed = Trace::from_reader(buffer.as_slice()).unwrap();
        assert_eq!(parsed, trace);
    }
}
