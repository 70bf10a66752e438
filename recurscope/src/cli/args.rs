//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::interceptor::{TracerConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

#[derive(Parser, Debug)]
#[command(
    name = "recurscope",
    version,
    about = "Trace recursive functions and replay their execution step by step",
    after_help = "\
EXAMPLES:
    recurscope list                                  Show the built-in functions
    recurscope trace fibonacci 5                     Print calls and returns as they happen
    recurscope tree binarySearch '[1,2,3,4,5], 4'    Draw the finished call tree
    recurscope play factorial 6                      Step through a run interactively"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Abort a run once calls nest this deep (1 to 10000)
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth, value_name = "N")]
    pub max_depth: usize,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn tracer_config(&self) -> TracerConfig {
        TracerConfig { max_depth: self.max_depth }
    }
}

fn parse_max_depth(s: &str) -> Result<usize, String> {
    let depth: usize = s.parse().map_err(|e| format!("{e}"))?;
    if (1..=MAX_DEPTH_LIMIT).contains(&depth) {
        Ok(depth)
    } else {
        Err(format!("must be between 1 and {MAX_DEPTH_LIMIT}"))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the built-in functions with their example arguments
    List,

    /// Run a function and print each call and return as it happens
    Trace {
        #[command(flatten)]
        target: Target,

        /// Save the trace as JSON (replayable with `recurscope replay`)
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,

        /// Save the trace in Chrome Trace Event Format (Perfetto, chrome://tracing)
        #[arg(long, value_name = "FILE")]
        chrome: Option<PathBuf>,
    },

    /// Print the call tree, finished or as of one event
    Tree {
        #[command(flatten)]
        target: Target,

        /// Event index to stop at (default: last event)
        #[arg(long, value_name = "N")]
        step: Option<usize>,
    },

    /// Print the active call stack as of one event
    Stack {
        #[command(flatten)]
        target: Target,

        /// Event index to stop at (default: last event)
        #[arg(long, value_name = "N")]
        step: Option<usize>,
    },

    /// Count calls for input sizes 1..=min(upper, 8)
    Complexity {
        #[command(flatten)]
        target: Target,

        /// Argument position that receives the input size
        #[arg(long, default_value_t = 0, value_name = "INDEX")]
        size_arg: usize,

        /// Largest size to sample (default: the value of the size argument)
        #[arg(long, value_name = "N")]
        upper: Option<i64>,

        /// Reference curve label, e.g. "O(n log n)" (default: the function's own)
        #[arg(long, value_name = "LABEL")]
        big_o: Option<String>,
    },

    /// Step through a run in the terminal UI
    Play {
        #[command(flatten)]
        target: Target,
    },

    /// Step through a saved trace in the terminal UI
    Replay {
        /// Trace JSON written by `recurscope trace --export`
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Function and arguments to run
#[derive(clap::Args, Debug)]
pub struct Target {
    /// Function name (see `recurscope list`)
    #[arg(value_name = "FUNCTION")]
    pub function: String,

    /// Arguments written as in a call, e.g. "[1,2,3], 7" (default: the function's example)
    #[arg(value_name = "ARGS", allow_hyphen_values = true)]
    pub args: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trace_with_exports() {
        let args = Args::parse_from([
            "recurscope", "trace", "fibonacci", "5", "--export", "t.json", "--max-depth", "50",
        ]);
        assert_eq!(args.max_depth, 50);
        match args.command {
            Command::Trace { target, export, chrome } => {
                assert_eq!(target.function, "fibonacci");
                assert_eq!(target.args.as_deref(), Some("5"));
                assert_eq!(export, Some(PathBuf::from("t.json")));
                assert!(chrome.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_max_depth_out_of_range_rejected() {
        assert!(Args::try_parse_from(["recurscope", "--max-depth", "1000000", "list"]).is_err());
        assert!(Args::try_parse_from(["recurscope", "--max-depth", "0", "list"]).is_err());
        let limit = MAX_DEPTH_LIMIT.to_string();
        let args = Args::try_parse_from(["recurscope", "--max-depth", limit.as_str(), "list"]).unwrap();
        assert_eq!(args.tracer_config().max_depth, MAX_DEPTH_LIMIT);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["recurscope", "complexity", "gcd"]);
        assert_eq!(args.tracer_config(), TracerConfig::default());
        match args.command {
            Command::Complexity { target, size_arg, upper, big_o } => {
                assert!(target.args.is_none());
                assert_eq!(size_arg, 0);
                assert!(upper.is_none());
                assert!(big_o.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_negative_argument_is_not_a_flag() {
        let args = Args::parse_from(["recurscope", "tree", "factorial", "-3"]);
        match args.command {
            Command::Tree { target, .. } => assert_eq!(target.args.as_deref(), Some("-3")),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
