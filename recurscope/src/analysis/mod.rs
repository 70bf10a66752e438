//! Analysis over finished traces
//!
//! This module holds the pure computations the CLI and TUI present:
//! per-size call counts, their reference curves, and whole-run statistics.

pub mod complexity;
pub mod growth;
pub mod stats;

pub use complexity::{sample_complexity, ComplexitySample, MAX_SAMPLE_SIZE};
pub use growth::{reference_curve, GrowthModel};
pub use stats::{RedundantCall, TraceStats};
