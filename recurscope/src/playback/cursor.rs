//! Bounded position into a trace.
//!
//! The cursor owns nothing but the position (and the length it is bounded
//! by). Every operation clamps instead of failing; on an empty trace the
//! cursor is inactive and all moves are no-ops.

use crate::domain::{CallId, TraceEvent};
use crate::reconstruct::{reconstruct_stack, reconstruct_tree, CallStackFrame, CallTreeNode};
use crate::trace_data::Trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCursor {
    len: usize,
    position: usize,
}

impl PlaybackCursor {
    /// Cursor at the first event of `trace`
    #[must_use]
    pub fn new(trace: &Trace) -> Self {
        Self { len: trace.len(), position: 0 }
    }

    /// Cursor at the last event of `trace`
    #[must_use]
    pub fn at_end(trace: &Trace) -> Self {
        let mut cursor = Self::new(trace);
        cursor.to_end();
        cursor
    }

    /// Current index, `None` when the trace is empty
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        (self.len > 0).then_some(self.position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.len == 0 || self.position + 1 == self.len
    }

    pub fn step_forward(&mut self) {
        self.seek(self.position.saturating_add(1));
    }

    pub fn step_back(&mut self) {
        self.seek(self.position.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn to_end(&mut self) {
        self.position = self.len.saturating_sub(1);
    }

    /// Jump to `index`, clamped to the last event
    pub fn seek(&mut self, index: usize) {
        self.position = index.min(self.len.saturating_sub(1));
    }

    /// Jump to the call event carrying `id`; no-op when it is not in `trace`
    pub fn seek_to_event(&mut self, trace: &Trace, id: CallId) {
        debug_assert_eq!(trace.len(), self.len, "cursor used with a different trace");
        if let Some(index) = trace.call_index(id) {
            self.seek(index);
        }
    }

    /// Call tree as of the current position
    #[must_use]
    pub fn tree(&self, trace: &Trace) -> Option<CallTreeNode> {
        self.position().and_then(|p| reconstruct_tree(trace, p))
    }

    /// Active stack as of the current position
    #[must_use]
    pub fn stack(&self, trace: &Trace) -> Vec<CallStackFrame> {
        self.position().map(|p| reconstruct_stack(trace, p)).unwrap_or_default()
    }

    /// Event under the cursor
    #[must_use]
    pub fn event<'t>(&self, trace: &'t Trace) -> Option<&'t TraceEvent> {
        self.position().and_then(|p| trace.get(p))
    }
}

/// Human-readable description of the event at `index`
///
/// `Calling fibonacci(3)` for calls, `fibonacci(1) returned 1` for returns.
#[must_use]
pub fn describe_step(trace: &Trace, index: usize) -> Option<String> {
    match trace.get(index)? {
        TraceEvent::Call(call) => Some(format!("Calling {}", call.signature())),
        TraceEvent::Return(ret) => {
            let signature = trace.call(ret.id).map_or_else(|| ret.id.to_string(), |c| c.signature());
            Some(format!("{signature} returned {}", ret.value))
        }
    }
}
