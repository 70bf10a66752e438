//! Instrumented call interceptor
//!
//! Runs a [`RecursiveFn`] once and records every invocation reachable from
//! that initial call, recursive self-calls included:
//! - `recur`: the traced self-reference handed to function bodies
//! - `sink`: where events go as they happen (in-memory or a channel)
//!
//! Each run owns its shadow stack and id counter, so there is no shared
//! mutable state between runs and nothing to restore afterwards. Each run
//! also gets its own thread, with a stack sized for `max_depth` nested
//! calls, so hitting the depth limit is an ordinary failed run whichever
//! thread asked for the trace.

pub mod recur;
pub mod sink;

pub use recur::{NamedFn, Recur, RecursiveFn};
pub use sink::{ChannelSink, TraceSink};

use log::{debug, warn};

use crate::domain::{CallError, TraceError, Value};
use crate::trace_data::Trace;

/// Default bound on nested traced calls
pub const DEFAULT_MAX_DEPTH: usize = 2_000;

/// Largest accepted `max_depth`; larger settings are clamped
pub const MAX_DEPTH_LIMIT: usize = 10_000;

// Tracer thread stack: fixed base plus a budget per nested call
const STACK_BASE: usize = 1024 * 1024;
const STACK_PER_LEVEL: usize = 16 * 1024;

/// Tracer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracerConfig {
    /// Nesting at which a run fails with [`CallError::DepthExceeded`]
    pub max_depth: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl TracerConfig {
    /// Stack size of the thread a run executes on
    #[must_use]
    pub fn stack_size(&self) -> usize {
        STACK_BASE + self.max_depth.min(MAX_DEPTH_LIMIT) * STACK_PER_LEVEL
    }
}

/// Runs functions under instrumentation
#[derive(Debug, Clone, Copy, Default)]
pub struct Tracer {
    config: TracerConfig,
}

impl Tracer {
    /// `config.max_depth` is clamped to [`MAX_DEPTH_LIMIT`]
    #[must_use]
    pub fn new(mut config: TracerConfig) -> Self {
        if config.max_depth > MAX_DEPTH_LIMIT {
            warn!("max depth {} clamped to {MAX_DEPTH_LIMIT}", config.max_depth);
            config.max_depth = MAX_DEPTH_LIMIT;
        }
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> TracerConfig {
        self.config
    }

    /// Trace `func(args)` to completion.
    ///
    /// # Errors
    /// [`TraceError::Execution`] when the function fails; the error carries the
    /// partial trace recorded up to the failure.
    pub fn trace(&self, func: &dyn RecursiveFn, args: Vec<Value>) -> Result<Trace, TraceError> {
        let mut events = Vec::new();
        match self.trace_into(func, args, &mut events) {
            Ok(_) => Ok(Trace::new(events)),
            Err(source) => Err(TraceError::Execution {
                function: func.name().to_string(),
                source,
                partial: Trace::new(events),
            }),
        }
    }

    /// Trace `func(args)`, handing each event to `sink` as it happens.
    ///
    /// The function runs on a scoped thread sized by
    /// [`TracerConfig::stack_size`]; a panic in the body is resumed on the
    /// calling thread.
    ///
    /// # Errors
    /// Whatever the traced function raised, or
    /// [`CallError::ThreadUnavailable`] when the tracer thread cannot start.
    pub fn trace_into(
        &self,
        func: &dyn RecursiveFn,
        args: Vec<Value>,
        sink: &mut dyn TraceSink,
    ) -> Result<Value, CallError> {
        std::thread::scope(|scope| {
            let handle = std::thread::Builder::new()
                .name("tracer".into())
                .stack_size(self.config.stack_size())
                .spawn_scoped(scope, move || self.run(func, args, sink))
                .map_err(|e| CallError::ThreadUnavailable(e.to_string()))?;
            handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        })
    }

    fn run(&self, func: &dyn RecursiveFn, args: Vec<Value>, sink: &mut dyn TraceSink) -> Result<Value, CallError> {
        debug!("tracing {} with {} argument(s)", func.name(), args.len());
        let mut recur = Recur::new(func, sink, self.config.max_depth);
        let result = recur.call(args);
        match &result {
            Ok(value) => debug!("{} returned {value} after {} calls", func.name(), recur.calls_entered()),
            Err(err) => debug!("{} failed after {} calls: {err}", func.name(), recur.calls_entered()),
        }
        result
    }
}

/// Trace `func(args)` with the default configuration
///
/// # Errors
/// See [`Tracer::trace`].
pub fn trace(func: &dyn RecursiveFn, args: Vec<Value>) -> Result<Trace, TraceError> {
    Tracer::default().trace(func, args)
}
