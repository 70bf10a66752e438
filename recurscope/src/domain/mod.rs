//! Domain model for recurscope
//!
//! This module contains core domain types and errors that provide:
//! - Self-documenting function signatures
//! - Structured error handling

pub mod errors;

// Re-export the shared trace model for convenience
pub use recurscope_common::{CallEvent, CallId, ReturnEvent, TraceEvent, Value};

pub use errors::{ArgumentError, CallError, ExportError, MalformedTrace, TraceError};
