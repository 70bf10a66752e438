//! View reconstruction from trace prefixes
//!
//! Both reconstructors are pure functions of `(trace, upto)`; playback calls
//! them again whenever the cursor moves.

pub mod stack;
pub mod tree;

pub use stack::{reconstruct_stack, CallStackFrame};
pub use tree::{reconstruct_tree, CallTreeNode};
