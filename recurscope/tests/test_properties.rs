use recurscope::catalog::Catalog;
use recurscope::catalog::parse_arguments;
use recurscope::domain::TraceEvent;
use recurscope::interceptor::trace;
use recurscope::playback::PlaybackCursor;
use recurscope::reconstruct::{reconstruct_stack, reconstruct_tree};
use recurscope::trace_data::Trace;

/// One successful trace per built-in, on its default arguments
fn builtin_traces() -> Vec<(String, Trace)> {
    let catalog = Catalog::builtin();
    catalog
        .entries()
        .iter()
        .map(|entry| {
            let args = parse_arguments(entry.default_args).expect("default arguments parse");
            let trace = trace(entry.function.as_ref(), args).expect("default run succeeds");
            (entry.name().to_string(), trace)
        })
        .collect()
}

#[test]
fn test_stack_empty_after_outermost_return() {
    for (name, trace) in builtin_traces() {
        assert!(reconstruct_stack(&trace, trace.len() - 1).is_empty(), "{name}");
    }
}

#[test]
fn test_tree_has_one_node_per_call_so_far() {
    for (name, trace) in builtin_traces() {
        for i in 0..trace.len() {
            let calls = trace.events()[..=i].iter().filter(|e| e.is_call()).count();
            let nodes = reconstruct_tree(&trace, i).map_or(0, |t| t.node_count());
            assert_eq!(nodes, calls, "{name} prefix {i}");
        }
    }
}

#[test]
fn test_reconstruction_is_pure() {
    for (name, trace) in builtin_traces() {
        for i in 0..trace.len() {
            assert_eq!(reconstruct_tree(&trace, i), reconstruct_tree(&trace, i), "{name} tree {i}");
            assert_eq!(reconstruct_stack(&trace, i), reconstruct_stack(&trace, i), "{name} stack {i}");
        }
    }
}

#[test]
fn test_resolved_count_never_drops_while_stepping_forward() {
    for (name, trace) in builtin_traces() {
        let mut cursor = PlaybackCursor::new(&trace);
        let mut resolved = 0;
        loop {
            let now = cursor.tree(&trace).map_or(0, |t| t.resolved_count());
            assert!(now >= resolved, "{name} at {:?}", cursor.position());
            resolved = now;
            if cursor.is_at_end() {
                break;
            }
            cursor.step_forward();
        }
        assert_eq!(resolved, trace.call_count(), "{name} ends fully resolved");
    }
}

#[test]
fn test_ids_are_dense_and_returns_nest() {
    for (name, trace) in builtin_traces() {
        let mut open = Vec::new();
        let mut next = 0;
        for event in trace.events() {
            match event {
                TraceEvent::Call(call) => {
                    assert_eq!(call.id.0, next, "{name}");
                    assert_eq!(call.parent_id, open.last().copied(), "{name}");
                    open.push(call.id);
                    next += 1;
                }
                TraceEvent::Return(ret) => {
                    assert_eq!(open.pop(), Some(ret.id), "{name}");
                }
            }
        }
        assert!(open.is_empty(), "{name}");
    }
}

#[test]
fn test_cursor_clamps_at_both_ends() {
    let (_, trace) = builtin_traces().into_iter().next().unwrap();
    let mut cursor = PlaybackCursor::new(&trace);
    cursor.step_back();
    assert_eq!(cursor.position(), Some(0));
    cursor.seek(usize::MAX);
    assert_eq!(cursor.position(), trace.last_index());
    cursor.step_forward();
    assert_eq!(cursor.position(), trace.last_index());
    cursor.reset();
    assert_eq!(cursor.position(), Some(0));

    let empty = Trace::default();
    let mut cursor = PlaybackCursor::new(&empty);
    cursor.step_forward();
    assert_eq!(cursor.position(), None);
    assert!(cursor.tree(&empty).is_none());
}
