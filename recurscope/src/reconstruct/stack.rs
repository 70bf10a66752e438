//! Active call stack at a trace prefix.
//!
//! Replays the interceptor's shadow-stack discipline over stored events:
//! push on call, pop on return when the returning call is topmost.

use log::warn;
use serde::Serialize;

use crate::domain::{CallId, MalformedTrace, TraceEvent, Value};
use crate::trace_data::Trace;

/// A call that has been entered but has not returned
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStackFrame {
    pub id: CallId,
    pub function_name: String,
    pub arguments: Vec<Value>,
}

impl CallStackFrame {
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.function_name, recurscope_common::join_values(&self.arguments))
    }
}

/// Frames active after event `upto` (inclusive), outermost first.
///
/// An `upto` past the end covers the whole trace. A return that does not
/// match the topmost frame is logged and leaves the stack untouched.
#[must_use]
pub fn reconstruct_stack(trace: &Trace, upto: usize) -> Vec<CallStackFrame> {
    let prefix = trace.events().get(..=upto).unwrap_or(trace.events());
    let mut stack: Vec<CallStackFrame> = Vec::new();

    for event in prefix {
        match event {
            TraceEvent::Call(call) => stack.push(CallStackFrame {
                id: call.id,
                function_name: call.function_name.clone(),
                arguments: call.arguments.clone(),
            }),
            TraceEvent::Return(ret) => match stack.last() {
                Some(top) if top.id == ret.id => {
                    stack.pop();
                }
                Some(top) => {
                    warn!("malformed trace: {}", MalformedTrace::ReturnNotTopmost { id: ret.id, top: top.id });
                }
                None => warn!("malformed trace: {}", MalformedTrace::UnmatchedReturn { id: ret.id }),
            },
        }
    }

    stack
}
