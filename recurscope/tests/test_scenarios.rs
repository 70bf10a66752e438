use recurscope::analysis::sample_complexity;
use recurscope::catalog::{Factorial, Fibonacci, MemoFibonacci};
use recurscope::domain::{CallError, CallId, TraceEvent, Value};
use recurscope::interceptor::{trace, NamedFn, Recur, Tracer};
use recurscope::reconstruct::{reconstruct_stack, reconstruct_tree};
use recurscope::trace_data::Trace;

fn open_calls(trace: &Trace, upto: usize) -> usize {
    let calls = trace.events()[..=upto].iter().filter(|e| e.is_call()).count();
    calls - (upto + 1 - calls)
}

#[test]
fn test_fibonacci_3_shape() {
    let trace = trace(&Fibonacci, vec![Value::Int(3)]).expect("fibonacci(3) should succeed");

    assert_eq!(trace.call_count(), 5);
    assert_eq!(trace.return_count(), 5);

    let root = trace.events()[0].as_call().expect("first event is a call");
    assert_eq!(root.id, CallId(0));
    assert_eq!(root.parent_id, None);
    assert_eq!(root.arguments, vec![Value::Int(3)]);
    assert_eq!(trace.result(), Some(&Value::Int(2)));

    let tree = reconstruct_tree(&trace, trace.len() - 1).expect("non-empty trace has a root");
    assert_eq!(tree.return_value, Some(Value::Int(2)));
    assert_eq!(tree.children.len(), 2);
}

#[test]
fn test_factorial_4_stack_tracks_depth() {
    let trace = trace(&Factorial, vec![Value::Int(4)]).expect("factorial(4) should succeed");
    assert_eq!(trace.call_count(), 4);

    let innermost = trace
        .events()
        .iter()
        .filter_map(TraceEvent::as_call)
        .last()
        .expect("at least one call");
    assert_eq!(innermost.arguments, vec![Value::Int(1)]);
    let innermost_return = trace
        .events()
        .iter()
        .filter_map(TraceEvent::as_return)
        .find(|r| r.id == innermost.id)
        .expect("innermost call returns");
    assert_eq!(innermost_return.value, Value::Int(1));

    for i in 0..trace.len() {
        assert_eq!(reconstruct_stack(&trace, i).len(), open_calls(&trace, i), "prefix {i}");
    }
    assert_eq!(trace.result(), Some(&Value::Int(24)));
}

#[test]
fn test_fibonacci_sampling_sizes_1_to_5() {
    let samples = sample_complexity(&Tracer::default(), &Fibonacci, &[Value::Int(5)], 0, 5)
        .expect("sampling fibonacci should succeed");

    let counts: Vec<_> = samples.iter().map(|s| s.operation_count).collect();
    assert_eq!(counts, vec![1, 3, 5, 9, 15]);
    assert!(counts.windows(2).all(|w| w[0] < w[1]));

    // 2 * fib(n + 1) - 1
    let fib = [0, 1, 1, 2, 3, 5, 8];
    for sample in &samples {
        let n = usize::try_from(sample.size).unwrap();
        assert_eq!(sample.operation_count, 2 * fib[n + 1] - 1);
    }
}

#[test]
fn test_sampling_caps_at_eight() {
    let samples = sample_complexity(&Tracer::default(), &Factorial, &[Value::Int(50)], 0, 50).unwrap();
    assert_eq!(samples.len(), 8);
    assert_eq!(samples.last().unwrap().size, 8);
}

#[test]
fn test_failure_leaves_well_formed_partial_trace() {
    // fib-shaped, but the n == 0 leaf throws
    let fragile = NamedFn::new("fragile", |recur: &mut Recur<'_>, args: &[Value]| {
        let n = args[0].as_int().unwrap_or(0);
        match n {
            0 => Err(CallError::raised("reached zero")),
            1 => Ok(Value::Int(1)),
            _ => {
                let a = recur.call(vec![Value::Int(n - 1)])?;
                let b = recur.call(vec![Value::Int(n - 2)])?;
                Ok(Value::Int(a.as_int().unwrap_or(0) + b.as_int().unwrap_or(0)))
            }
        }
    });

    let err = trace(&fragile, vec![Value::Int(3)]).unwrap_err();
    assert!(err.to_string().contains("reached zero"));
    let partial = err.partial_trace().expect("execution errors carry the partial trace");

    // f(3), f(2), f(1) returns, f(0) throws
    assert_eq!(partial.call_count(), 4);
    assert_eq!(partial.return_count(), 1);

    for ret in partial.events().iter().filter_map(TraceEvent::as_return) {
        assert!(partial.call(ret.id).is_some(), "return {} without a call", ret.id);
    }
    let failing = CallId(3);
    assert!(partial.call(failing).is_some());
    assert!(!partial.events().iter().filter_map(TraceEvent::as_return).any(|r| r.id == failing));

    let stack: Vec<_> = reconstruct_stack(partial, partial.len() - 1).iter().map(|f| f.id).collect();
    assert_eq!(stack, vec![CallId(0), CallId(1), CallId(3)]);
}

#[test]
fn test_failure_on_first_call() {
    let err = trace(&Factorial, vec![Value::Int(-1)]).unwrap_err();
    let partial = err.partial_trace().unwrap();
    assert_eq!(partial.len(), 1);
    assert!(partial.events()[0].is_call());
}

#[test]
fn test_empty_trace_reconstructs_to_nothing() {
    let empty = Trace::default();
    assert!(reconstruct_tree(&empty, 0).is_none());
    assert!(reconstruct_stack(&empty, 0).is_empty());
}

#[test]
fn test_depth_limit_fails_the_run() {
    let tracer = Tracer::new(recurscope::interceptor::TracerConfig { max_depth: 10 });
    let err = tracer.trace(&Factorial, vec![Value::Int(20)]).unwrap_err();
    let partial = err.partial_trace().unwrap();
    assert_eq!(partial.call_count(), 10);
    assert_eq!(partial.return_count(), 0);
}

#[test]
fn test_memo_outliving_runs_flattens_samples() {
    let memo = MemoFibonacci::default();

    let first = trace(&memo, vec![Value::Int(6)]).unwrap();
    assert_eq!(first.call_count(), 11);
    assert_eq!(first.result(), Some(&Value::Int(8)));

    let second = trace(&memo, vec![Value::Int(6)]).unwrap();
    assert_eq!(second.call_count(), 1);

    let samples = sample_complexity(&Tracer::default(), &memo, &[Value::Int(6)], 0, 6).unwrap();
    assert!(samples.iter().all(|s| s.operation_count == 1));

    memo.clear();
    let fresh = trace(&memo, vec![Value::Int(6)]).unwrap();
    assert_eq!(fresh, first);
}
