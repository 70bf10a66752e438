//! Trace export
//!
//! The native format is the trace JSON itself ([`crate::trace_data::Trace::to_writer`]).
//! This module adds Chrome Trace Event Format for viewing in Perfetto or
//! `chrome://tracing`.

pub mod chrome_trace;

pub use chrome_trace::ChromeTraceExporter;
