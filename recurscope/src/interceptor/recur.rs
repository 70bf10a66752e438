//! Traced self-reference handed to recursive function bodies.
//!
//! A body never names itself. It recurses through [`Recur::call`], which is
//! the instrumented version of the same function: every entry allocates the
//! next id, reads the parent from the shadow stack, records a call event and
//! pushes the id; every normal exit records a return event. The id is popped
//! on every exit path, so an error leaves the shadow stack balanced and the
//! failing call without a return event.

use log::trace;

use super::sink::TraceSink;
use crate::domain::{CallError, CallEvent, CallId, ReturnEvent, TraceEvent, Value};

/// A recursive function that can be traced.
///
/// Implementations recurse through `recur`, never by calling themselves
/// directly, otherwise the inner calls are invisible to the trace.
pub trait RecursiveFn: Send + Sync {
    /// Declared name, recorded on every call event
    fn name(&self) -> &str;

    /// Run the body once for `args`
    ///
    /// # Errors
    /// Whatever the body raises, plus anything propagated from nested calls.
    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError>;
}

/// Closure-backed [`RecursiveFn`]
pub struct NamedFn<F> {
    name: String,
    body: F,
}

impl<F> NamedFn<F>
where
    F: Fn(&mut Recur<'_>, &[Value]) -> Result<Value, CallError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, body: F) -> Self {
        Self { name: name.into(), body }
    }
}

impl<F> RecursiveFn for NamedFn<F>
where
    F: Fn(&mut Recur<'_>, &[Value]) -> Result<Value, CallError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError> {
        (self.body)(recur, args)
    }
}

/// Per-run interception state: shadow stack, id counter, event sink
pub struct Recur<'a> {
    func: &'a dyn RecursiveFn,
    sink: &'a mut dyn TraceSink,
    shadow: Vec<CallId>,
    next_id: u64,
    max_depth: usize,
}

impl<'a> Recur<'a> {
    pub(crate) fn new(func: &'a dyn RecursiveFn, sink: &'a mut dyn TraceSink, max_depth: usize) -> Self {
        Self { func, sink, shadow: Vec::new(), next_id: 0, max_depth }
    }

    /// Invoke the traced function with `args`.
    ///
    /// # Errors
    /// Returns [`CallError::DepthExceeded`] without recording anything when the
    /// shadow stack is already `max_depth` deep, otherwise whatever the body
    /// raises.
    pub fn call(&mut self, args: Vec<Value>) -> Result<Value, CallError> {
        if self.shadow.len() >= self.max_depth {
            return Err(CallError::DepthExceeded { limit: self.max_depth });
        }

        let id = CallId(self.next_id);
        self.next_id += 1;
        let parent_id = self.shadow.last().copied();

        let event = CallEvent {
            id,
            parent_id,
            function_name: self.func.name().to_string(),
            arguments: args.clone(),
        };
        trace!("enter {} {}", id, event.signature());
        self.sink.record(TraceEvent::Call(event));
        self.shadow.push(id);

        let func = self.func;
        let outcome = func.invoke(self, &args);
        self.shadow.pop();

        let value = outcome?;
        trace!("exit {id} => {value}");
        self.sink.record(TraceEvent::Return(ReturnEvent { id, value: value.clone() }));
        Ok(value)
    }

    /// Number of calls currently in flight
    #[must_use]
    pub fn depth(&self) -> usize {
        self.shadow.len()
    }

    /// Innermost call in flight
    #[must_use]
    pub fn current(&self) -> Option<CallId> {
        self.shadow.last().copied()
    }

    /// Total calls entered so far in this run
    #[must_use]
    pub fn calls_entered(&self) -> u64 {
        self.next_id
    }
}
