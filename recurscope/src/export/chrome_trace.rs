//! Chrome Trace Event Format export.
//!
//! Each call becomes a `B` (begin) event and each return an `E` (end) event
//! on a single thread, so Perfetto or `chrome://tracing` draws the recursion
//! as nested slices. There is no wall clock in a trace; the timestamp is the
//! event index.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use crate::domain::{CallId, ExportError, TraceEvent};
use crate::trace_data::Trace;

/// One Chrome trace event
/// Format: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU/preview
#[derive(Debug, Clone, Serialize)]
struct ChromeTraceEvent {
    /// Function name on `B`, same name on the matching `E`
    name: String,
    cat: &'static str,
    /// "B" = begin, "E" = end
    ph: &'static str,
    ts: u64,
    pid: u32,
    tid: u32,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    args: BTreeMap<&'static str, JsonValue>,
}

#[derive(Debug, Serialize)]
struct ChromeTrace {
    #[serde(rename = "traceEvents")]
    trace_events: Vec<ChromeTraceEvent>,
    #[serde(rename = "displayTimeUnit")]
    display_time_unit: &'static str,
}

/// Converts a [`Trace`] into Chrome trace JSON
#[derive(Debug, Default)]
pub struct ChromeTraceExporter {
    events: Vec<ChromeTraceEvent>,
    /// Names of calls that have begun but not ended, for their `E` events
    open: HashMap<CallId, String>,
}

impl ChromeTraceExporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_trace(trace: &Trace) -> Self {
        let mut exporter = Self::new();
        for event in trace.events() {
            exporter.add_event(event);
        }
        exporter
    }

    /// Append one event, in trace order
    pub fn add_event(&mut self, event: &TraceEvent) {
        let ts = self.events.len() as u64;
        let (name, ph, args) = match event {
            TraceEvent::Call(call) => {
                self.open.insert(call.id, call.function_name.clone());
                let mut args = BTreeMap::new();
                args.insert("id", serde_json::json!(call.id.0));
                args.insert("arguments", serde_json::json!(recurscope_common::join_values(&call.arguments)));
                (call.function_name.clone(), "B", args)
            }
            TraceEvent::Return(ret) => {
                let name = self.open.remove(&ret.id).unwrap_or_else(|| "return".to_string());
                let mut args = BTreeMap::new();
                args.insert("id", serde_json::json!(ret.id.0));
                args.insert("value", serde_json::json!(ret.value.to_string()));
                (name, "E", args)
            }
        };
        self.events.push(ChromeTraceEvent { name, cat: "call", ph, ts, pid: 1, tid: 1, args });
    }

    /// Write the trace to any writer (file, stdout, buffer)
    ///
    /// # Errors
    /// I/O or serialization failures.
    pub fn export<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let trace = ChromeTrace { trace_events: self.events.clone(), display_time_unit: "ms" };
        serde_json::to_writer_pretty(writer, &trace)?;
        Ok(())
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}
