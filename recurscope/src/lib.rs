//! # Recurscope - Recursion Execution Tracer
//!
//! Recurscope runs a recursive function under instrumentation, records every
//! call and return as an ordered event log, and rebuilds the call tree and
//! call stack as they stood after any event so a run can be replayed one
//! step at a time.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Recursive Function                           │
//! │            (RecursiveFn, recurses through Recur)                │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ call / return
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Interceptor (Tracer + Recur)                   │
//! │  • shadow stack of open call ids                                │
//! │  • ids assigned from 0 per run                                  │
//! │  • events pushed to a TraceSink (Vec or channel)                │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ Trace (ordered events)
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │  │ Reconstruct  │──▶│   Playback   │──▶│     TUI      │         │
//! │  │ (tree/stack) │   │   (cursor)   │   │  (Terminal)  │         │
//! │  └──────────────┘   └──────────────┘   └──────────────┘         │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐                            │
//! │  │   Analysis   │   │    Export    │                            │
//! │  │ (complexity) │   │ (json/chrome)│                            │
//! │  └──────────────┘   └──────────────┘                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! ### Core Pipeline Modules
//!
//! - [`interceptor`]: runs a function and records its calls
//!   - `recur`: the traced self-reference handed to function bodies
//!   - `sink`: in-memory and channel event sinks
//!
//! - [`reconstruct`]: call tree and active stack for any trace prefix
//!
//! - [`playback`]: bounded cursor over a trace, autoplay speeds
//!
//! - [`analysis`]: call counts per input size, reference curves, run statistics
//!
//! - [`export`]: Chrome Trace Event Format for Perfetto / `chrome://tracing`
//!
//! ### UI and Data Modules
//!
//! - [`tui`]: interactive playback with ratatui
//! - [`cli`]: command-line argument parsing
//! - [`report`]: plain-text rendering shared by the CLI and TUI
//! - [`catalog`]: built-in recursive algorithms and argument parsing
//! - [`session`]: one run plus everything derived from it
//! - [`trace_data`]: the event log and its JSON form
//! - [`domain`]: shared event types and errors
//!
//! ## Typical Usage
//!
//! ```bash
//! # Watch calls and returns stream by
//! recurscope trace fibonacci 5
//!
//! # Save a run and replay it later
//! recurscope trace fibonacci 5 --export fib5.json
//! recurscope replay fib5.json
//!
//! # How does the call count grow with n?
//! recurscope complexity fibonacci 8
//! ```
//!
//! ## Writing a Traceable Function
//!
//! ```
//! use recurscope::domain::Value;
//! use recurscope::interceptor::{trace, NamedFn, Recur};
//!
//! let countdown = NamedFn::new("countdown", |recur: &mut Recur<'_>, args: &[Value]| {
//!     let n = args[0].as_int().unwrap_or(0);
//!     if n == 0 {
//!         return Ok(Value::Int(0));
//!     }
//!     recur.call(vec![Value::Int(n - 1)])
//! });
//!
//! let trace = trace(&countdown, vec![Value::Int(3)]).unwrap();
//! assert_eq!(trace.call_count(), 4);
//! ```

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod domain;
pub mod export;
pub mod interceptor;
pub mod playback;
pub mod reconstruct;
pub mod report;
pub mod session;
pub mod trace_data;
pub mod tui;
