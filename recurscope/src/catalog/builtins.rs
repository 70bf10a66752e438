//! Built-in recursive algorithms.
//!
//! Each one recurses only through [`Recur::call`], so every nested invocation
//! shows up in the trace. Integer arithmetic is checked and reports
//! [`CallError::Overflow`] rather than wrapping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{CallError, Value};
use crate::interceptor::{Recur, RecursiveFn};

/// Argument `index` as an integer
///
/// # Errors
/// [`CallError::BadArgument`] when missing or not a whole number.
pub fn expect_int(function: &str, args: &[Value], index: usize) -> Result<i64, CallError> {
    let value = args.get(index).unwrap_or(&Value::Null);
    value.as_int().ok_or_else(|| bad_argument(function, index, "an integer", value))
}

/// Argument `index` as a list
///
/// # Errors
/// [`CallError::BadArgument`] when missing or not a list.
pub fn expect_list<'v>(function: &str, args: &'v [Value], index: usize) -> Result<&'v [Value], CallError> {
    let value = args.get(index).unwrap_or(&Value::Null);
    value.as_list().ok_or_else(|| bad_argument(function, index, "a list", value))
}

/// Optional integer argument, `default` when absent or null
fn int_or(function: &str, args: &[Value], index: usize, default: i64) -> Result<i64, CallError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(default),
        Some(_) => expect_int(function, args, index),
    }
}

fn bad_argument(function: &str, index: usize, expected: &'static str, found: &Value) -> CallError {
    CallError::BadArgument {
        function: function.to_string(),
        index,
        expected,
        found: found.type_name().to_string(),
    }
}

fn overflow(function: &str) -> CallError {
    CallError::Overflow { function: function.to_string() }
}

fn int_of(function: &str, value: &Value) -> Result<i64, CallError> {
    value.as_int().ok_or_else(|| CallError::raised(format!("{function}: expected an integer result, got {value}")))
}

#[allow(clippy::cast_possible_wrap)]
fn len_as_int(items: &[Value]) -> i64 {
    items.len() as i64
}

// ============================================================================
// Algorithms
// ============================================================================

/// `fibonacci(n) = n` for `n <= 1`, else `fibonacci(n-1) + fibonacci(n-2)`
pub struct Fibonacci;

impl RecursiveFn for Fibonacci {
    fn name(&self) -> &str {
        "fibonacci"
    }

    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError> {
        let n = expect_int(self.name(), args, 0)?;
        if n <= 1 {
            return Ok(Value::Int(n));
        }
        let a = int_of(self.name(), &recur.call(vec![Value::Int(n - 1)])?)?;
        let b = int_of(self.name(), &recur.call(vec![Value::Int(n - 2)])?)?;
        a.checked_add(b).map(Value::Int).ok_or_else(|| overflow(self.name()))
    }
}

/// `factorial(n)`; raises for negative `n`
pub struct Factorial;

impl RecursiveFn for Factorial {
    fn name(&self) -> &str {
        "factorial"
    }

    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError> {
        let n = expect_int(self.name(), args, 0)?;
        if n < 0 {
            return Err(CallError::raised(format!("factorial of negative number {n}")));
        }
        if n <= 1 {
            return Ok(Value::Int(1));
        }
        let rest = int_of(self.name(), &recur.call(vec![Value::Int(n - 1)])?)?;
        n.checked_mul(rest).map(Value::Int).ok_or_else(|| overflow(self.name()))
    }
}

/// `binarySearch(arr, target, left = 0, right = len - 1)`, index or -1
pub struct BinarySearch;

impl RecursiveFn for BinarySearch {
    fn name(&self) -> &str {
        "binarySearch"
    }

    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError> {
        let items = expect_list(self.name(), args, 0)?;
        let target = args.get(1).cloned().unwrap_or_default();
        let left = int_or(self.name(), args, 2, 0)?;
        let right = int_or(self.name(), args, 3, len_as_int(items) - 1)?;
        if left > right {
            return Ok(Value::Int(-1));
        }

        let mid = left + (right - left) / 2;
        let candidate = usize::try_from(mid)
            .ok()
            .and_then(|i| items.get(i))
            .ok_or_else(|| CallError::raised(format!("binarySearch: index {mid} out of bounds")))?;
        let order = compare(candidate, &target)
            .ok_or_else(|| CallError::raised(format!("binarySearch: cannot compare {candidate} with {target}")))?;

        let list = Value::List(items.to_vec());
        match order {
            std::cmp::Ordering::Equal => Ok(Value::Int(mid)),
            std::cmp::Ordering::Greater => {
                recur.call(vec![list, target, Value::Int(left), Value::Int(mid - 1)])
            }
            std::cmp::Ordering::Less => {
                recur.call(vec![list, target, Value::Int(mid + 1), Value::Int(right)])
            }
        }
    }
}

/// Numeric or textual ordering of two scalars
#[allow(clippy::cast_precision_loss)]
fn compare(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Int(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Int(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// `power(base, exp)` by repeated halving of even exponents
pub struct Power;

impl RecursiveFn for Power {
    fn name(&self) -> &str {
        "power"
    }

    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError> {
        let base = expect_int(self.name(), args, 0)?;
        let exp = expect_int(self.name(), args, 1)?;
        if exp < 0 {
            return Err(CallError::raised(format!("power: negative exponent {exp}")));
        }
        match exp {
            0 => Ok(Value::Int(1)),
            1 => Ok(Value::Int(base)),
            _ if exp % 2 == 0 => {
                let half = int_of(self.name(), &recur.call(vec![Value::Int(base), Value::Int(exp / 2)])?)?;
                half.checked_mul(half).map(Value::Int).ok_or_else(|| overflow(self.name()))
            }
            _ => {
                let rest = int_of(self.name(), &recur.call(vec![Value::Int(base), Value::Int(exp - 1)])?)?;
                base.checked_mul(rest).map(Value::Int).ok_or_else(|| overflow(self.name()))
            }
        }
    }
}

/// Euclid's `gcd(a, b)`
pub struct Gcd;

impl RecursiveFn for Gcd {
    fn name(&self) -> &str {
        "gcd"
    }

    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError> {
        let a = expect_int(self.name(), args, 0)?;
        let b = expect_int(self.name(), args, 1)?;
        if b == 0 {
            return Ok(Value::Int(a));
        }
        let rem = a.checked_rem(b).ok_or_else(|| overflow(self.name()))?;
        recur.call(vec![Value::Int(b), Value::Int(rem)])
    }
}

/// `sumArray(arr, index = 0)`
pub struct SumArray;

impl RecursiveFn for SumArray {
    fn name(&self) -> &str {
        "sumArray"
    }

    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError> {
        let items = expect_list(self.name(), args, 0)?;
        let index = int_or(self.name(), args, 1, 0)?;
        let Some(head) = usize::try_from(index).ok().and_then(|i| items.get(i)) else {
            return Ok(Value::Int(0));
        };
        let head = head.as_int().ok_or_else(|| bad_argument(self.name(), 0, "a list of integers", head))?;
        let rest = int_of(
            self.name(),
            &recur.call(vec![Value::List(items.to_vec()), Value::Int(index + 1)])?,
        )?;
        head.checked_add(rest).map(Value::Int).ok_or_else(|| overflow(self.name()))
    }
}

/// `customAlgorithm(n) = n + customAlgorithm(n - 1)`, 0 for `n <= 0`
pub struct CustomAlgorithm;

impl RecursiveFn for CustomAlgorithm {
    fn name(&self) -> &str {
        "customAlgorithm"
    }

    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError> {
        let n = expect_int(self.name(), args, 0)?;
        if n <= 0 {
            return Ok(Value::Int(0));
        }
        let rest = int_of(self.name(), &recur.call(vec![Value::Int(n - 1)])?)?;
        n.checked_add(rest).map(Value::Int).ok_or_else(|| overflow(self.name()))
    }
}

/// Fibonacci with a memo table that outlives any single run.
///
/// The table is shared by every run through this value, so repeated traces
/// (including every complexity sample) see the answers earlier runs stored.
#[derive(Default)]
pub struct MemoFibonacci {
    memo: Arc<Mutex<HashMap<i64, i64>>>,
}

impl MemoFibonacci {
    /// Handle to the memo table
    #[must_use]
    pub fn memo(&self) -> Arc<Mutex<HashMap<i64, i64>>> {
        Arc::clone(&self.memo)
    }

    pub fn clear(&self) {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn lookup(&self, n: i64) -> Option<i64> {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner).get(&n).copied()
    }

    fn store(&self, n: i64, value: i64) {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner).insert(n, value);
    }
}

impl RecursiveFn for MemoFibonacci {
    fn name(&self) -> &str {
        "memoFibonacci"
    }

    fn invoke(&self, recur: &mut Recur<'_>, args: &[Value]) -> Result<Value, CallError> {
        let n = expect_int(self.name(), args, 0)?;
        if let Some(hit) = self.lookup(n) {
            return Ok(Value::Int(hit));
        }
        if n <= 1 {
            return Ok(Value::Int(n));
        }
        let a = int_of(self.name(), &recur.call(vec![Value::Int(n - 1)])?)?;
        let b = int_of(self.name(), &recur.call(vec![Value::Int(n - 2)])?)?;
        let sum = a.checked_add(b).ok_or_else(|| overflow(self.name()))?;
        self.store(n, sum);
        Ok(Value::Int(sum))
    }
}
