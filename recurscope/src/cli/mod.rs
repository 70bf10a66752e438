//! Command-line interface for recurscope
//!
//! This module contains CLI argument parsing and configuration

pub mod args;

pub use args::{Args, Command, Target};
