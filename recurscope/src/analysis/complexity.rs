//! Empirical cost curve sampling.
//!
//! Runs the interceptor once per input size, substituting the size into one
//! argument slot, and counts the calls each run makes. Samples run strictly
//! one after another, each with a fresh trace and id counter. State the
//! function keeps outside itself (a memo table, say) is not reset between
//! samples, so memoized functions report low counts on later sizes.

use log::{debug, info};
use serde::Serialize;

use crate::domain::{TraceError, Value};
use crate::interceptor::{RecursiveFn, Tracer};

/// Hard cap on the largest sampled size
pub const MAX_SAMPLE_SIZE: i64 = 8;

/// Call count observed for one input size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexitySample {
    pub size: i64,
    pub operation_count: usize,
}

/// Sample sizes `1..=min(upper_bound, MAX_SAMPLE_SIZE)` of `func`.
///
/// `size_arg_index` designates the argument replaced by the size; every other
/// argument is passed unchanged. Returns an empty sequence when that argument
/// is missing or not numeric.
///
/// # Errors
/// The [`TraceError`] of the first sample run that fails.
pub fn sample_complexity(
    tracer: &Tracer,
    func: &dyn RecursiveFn,
    args: &[Value],
    size_arg_index: usize,
    upper_bound: i64,
) -> Result<Vec<ComplexitySample>, TraceError> {
    match args.get(size_arg_index) {
        Some(value) if value.is_numeric() => {}
        other => {
            debug!(
                "skipping complexity sampling of {}: argument {size_arg_index} is {}",
                func.name(),
                other.map_or("missing", Value::type_name)
            );
            return Ok(Vec::new());
        }
    }

    let last = upper_bound.min(MAX_SAMPLE_SIZE);
    let mut samples = Vec::new();
    for size in 1..=last {
        let mut sample_args = args.to_vec();
        sample_args[size_arg_index] = Value::Int(size);
        let trace = tracer.trace(func, sample_args)?;
        samples.push(ComplexitySample { size, operation_count: trace.call_count() });
    }

    info!("sampled {} size(s) of {}", samples.len(), func.name());
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CallError;
    use crate::interceptor::{NamedFn, Recur};

    fn linear() -> impl RecursiveFn {
        NamedFn::new("linear", |recur: &mut Recur<'_>, args: &[Value]| {
            let n = args[0].as_int().unwrap_or(0);
            if n <= 1 {
                Ok(Value::Int(1))
            } else {
                recur.call(vec![Value::Int(n - 1), args[1].clone()])
            }
        })
    }

    #[test]
    fn test_samples_are_capped_at_eight() {
        let samples =
            sample_complexity(&Tracer::default(), &linear(), &[Value::Int(50), Value::from("x")], 0, 50)
                .unwrap();
        assert_eq!(samples.len(), 8);
        assert_eq!(samples[7], ComplexitySample { size: 8, operation_count: 8 });
    }

    #[test]
    fn test_non_numeric_size_argument_yields_nothing() {
        let tracer = Tracer::default();
        let args = [Value::Int(3), Value::from("x")];
        assert!(sample_complexity(&tracer, &linear(), &args, 1, 5).unwrap().is_empty());
        assert!(sample_complexity(&tracer, &linear(), &args, 4, 5).unwrap().is_empty());
    }

    #[test]
    fn test_upper_bound_below_one_yields_nothing() {
        let samples =
            sample_complexity(&Tracer::default(), &linear(), &[Value::Int(0), Value::Null], 0, 0).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_failing_sample_propagates() {
        let failing = NamedFn::new("failing", |_: &mut Recur<'_>, args: &[Value]| {
            if args[0].as_int() == Some(3) {
                Err(CallError::raised("boom"))
            } else {
                Ok(Value::Null)
            }
        });
        let err = sample_complexity(&Tracer::default(), &failing, &[Value::Int(5)], 0, 5).unwrap_err();
        assert!(matches!(err, TraceError::Execution { .. }));
    }
}
