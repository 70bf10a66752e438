//! Named recursive functions available to the CLI and TUI
//!
//! - `builtins`: the algorithm library
//! - `arguments`: parsing `"[1, 2], 3"` style argument strings

pub mod arguments;
pub mod builtins;

use std::sync::Arc;

use crate::domain::TraceError;
use crate::interceptor::RecursiveFn;

pub use arguments::parse_arguments;
pub use builtins::{
    BinarySearch, CustomAlgorithm, Factorial, Fibonacci, Gcd, MemoFibonacci, Power, SumArray,
};

/// A traceable function with the metadata shown alongside it
#[derive(Clone)]
pub struct CatalogEntry {
    pub function: Arc<dyn RecursiveFn>,
    pub description: &'static str,
    /// Argument string used when none is given
    pub default_args: &'static str,
    /// Expected time complexity, e.g. `O(2^n)`
    pub big_o: &'static str,
}

fn entry(
    function: Arc<dyn RecursiveFn>,
    description: &'static str,
    default_args: &'static str,
    big_o: &'static str,
) -> CatalogEntry {
    CatalogEntry { function, description, default_args, big_o }
}

impl CatalogEntry {
    #[must_use]
    pub fn name(&self) -> &str {
        self.function.name()
    }
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("name", &self.name())
            .field("default_args", &self.default_args)
            .field("big_o", &self.big_o)
            .finish_non_exhaustive()
    }
}

/// Lookup table of [`CatalogEntry`] by function name
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The built-in algorithm library
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                entry(
                    Arc::new(Fibonacci),
                    "Classic Fibonacci sequence with exponential time complexity",
                    "5",
                    "O(2^n)",
                ),
                entry(
                    Arc::new(Factorial),
                    "Simple factorial calculation with linear time complexity",
                    "5",
                    "O(n)",
                ),
                entry(
                    Arc::new(BinarySearch),
                    "Efficient searching algorithm with logarithmic time complexity",
                    "[1,2,3,4,5,6,7,8,9,10], 7",
                    "O(log n)",
                ),
                entry(
                    Arc::new(Power),
                    "Optimized power calculation using divide and conquer",
                    "2, 10",
                    "O(log n)",
                ),
                entry(Arc::new(Gcd), "Greatest Common Divisor using Euclidean algorithm", "48, 18", "O(log n)"),
                entry(Arc::new(SumArray), "Recursive array summation", "[1, 2, 3, 4, 5]", "O(n)"),
                entry(Arc::new(CustomAlgorithm), "Sum of 1..n, one call per step", "5", "O(n)"),
                entry(
                    Arc::new(MemoFibonacci::default()),
                    "Fibonacci with a memo table kept between runs",
                    "6",
                    "O(n)",
                ),
            ],
        }
    }

    /// # Errors
    /// [`TraceError::NotAFunction`] for unknown names.
    pub fn get(&self, name: &str) -> Result<&CatalogEntry, TraceError> {
        self.entries
            .iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| TraceError::NotAFunction(name.to_string()))
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(CatalogEntry::name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
