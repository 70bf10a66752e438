//! Structured error types for recurscope
//!
//! Using thiserror for automatic Display implementation and error chaining.

use recurscope_common::CallId;
use thiserror::Error;

use crate::trace_data::Trace;

/// Failure raised inside a traced function body.
///
/// Propagates through every enclosing traced call with `?`; none of those
/// calls get a return event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("{0}")]
    Raised(String),

    #[error("{function}: argument {index} must be {expected}, got {found}")]
    BadArgument { function: String, index: usize, expected: &'static str, found: String },

    #[error("maximum call depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    #[error("{function}: integer overflow")]
    Overflow { function: String },

    #[error("could not start tracer thread: {0}")]
    ThreadUnavailable(String),
}

impl CallError {
    /// Error thrown by user code
    pub fn raised(message: impl Into<String>) -> Self {
        CallError::Raised(message.into())
    }
}

/// Failed run, reported to the caller as a result rather than swallowed
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("'{0}' is not a function")]
    NotAFunction(String),

    #[error("execution of {function} failed after {} events: {source}", .partial.len())]
    Execution {
        function: String,
        #[source]
        source: CallError,
        /// Well-formed prefix recorded before the failure
        partial: Trace,
    },
}

impl TraceError {
    /// Partial trace of a failed execution, if any was captured
    #[must_use]
    pub fn partial_trace(&self) -> Option<&Trace> {
        match self {
            TraceError::Execution { partial, .. } => Some(partial),
            TraceError::NotAFunction(_) => None,
        }
    }
}

/// Argument-string parsing failure (`"[1,2,3], 7"` style input)
#[derive(Error, Debug)]
pub enum ArgumentError {
    #[error("invalid argument list: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("argument {index}: objects are not supported")]
    Unsupported { index: usize },
}

/// Contract violation found while rebuilding views from a trace.
///
/// Never propagated: reconstructors log it and degrade to best effort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTrace {
    #[error("call {extra} is a second root (keeping {kept})")]
    DuplicateRoot { kept: CallId, extra: CallId },

    #[error("call {id} appears more than once")]
    DuplicateCall { id: CallId },

    #[error("call {id} names unknown parent {parent}")]
    OrphanCall { id: CallId, parent: CallId },

    #[error("return for {id} has no matching call")]
    UnmatchedReturn { id: CallId },

    #[error("return for {id} while {top} is the innermost call")]
    ReturnNotTopmost { id: CallId, top: CallId },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_function_display() {
        let err = TraceError::NotAFunction("fibonaci".to_string());
        assert_eq!(err.to_string(), "'fibonaci' is not a function");
        assert!(err.partial_trace().is_none());
    }

    #[test]
    fn test_bad_argument_display() {
        let err = CallError::BadArgument {
            function: "factorial".to_string(),
            index: 0,
            expected: "an integer",
            found: "text".to_string(),
        };
        assert_eq!(err.to_string(), "factorial: argument 0 must be an integer, got text");
    }

    #[test]
    fn test_malformed_trace_display() {
        let err = MalformedTrace::ReturnNotTopmost { id: CallId(1), top: CallId(2) };
        assert!(err.to_string().contains("#1"));
        assert!(err.to_string().contains("#2"));
    }
}
