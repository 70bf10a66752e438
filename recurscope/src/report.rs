//! Plain-text rendering shared by the CLI output and the TUI panels.

use std::fmt::Write as _;

use crate::analysis::{ComplexitySample, TraceStats};
use crate::domain::{CallId, TraceEvent};
use crate::reconstruct::{CallStackFrame, CallTreeNode};

/// One line of a drawn call tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: CallId,
    /// Box-drawing connector, e.g. `│   ├── `
    pub prefix: String,
    pub signature: String,
    /// Rendered return value, `None` while the call is still running
    pub result: Option<String>,
}

impl TreeRow {
    #[must_use]
    pub fn text(&self) -> String {
        match &self.result {
            Some(value) => format!("{}{} = {value}", self.prefix, self.signature),
            None => format!("{}{} …", self.prefix, self.signature),
        }
    }
}

/// Flatten a tree into pre-order rows with connectors
#[must_use]
pub fn tree_rows(root: &CallTreeNode) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_rows(root, "", "", &mut rows);
    rows
}

fn push_rows(node: &CallTreeNode, lead: &str, rest: &str, rows: &mut Vec<TreeRow>) {
    rows.push(TreeRow {
        id: node.id,
        prefix: lead.to_string(),
        signature: node.signature(),
        result: node.return_value.as_ref().map(ToString::to_string),
    });
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, pad) = if i == last { ("└── ", "    ") } else { ("├── ", "│   ") };
        push_rows(child, &format!("{rest}{branch}"), &format!("{rest}{pad}"), rows);
    }
}

#[must_use]
pub fn render_tree(root: Option<&CallTreeNode>) -> String {
    match root {
        Some(root) => tree_rows(root).iter().map(|r| r.text() + "\n").collect(),
        None => "(no calls)\n".to_string(),
    }
}

/// Innermost frame first
#[must_use]
pub fn render_stack(frames: &[CallStackFrame]) -> String {
    if frames.is_empty() {
        return "(empty stack)\n".to_string();
    }
    let mut out = String::new();
    for (depth, frame) in frames.iter().enumerate().rev() {
        let marker = if depth + 1 == frames.len() { "▶" } else { " " };
        let _ = writeln!(out, "{marker} {depth:>3}  {}", frame.signature());
    }
    out
}

/// One streamed event, indented by the depth it occurred at
#[must_use]
pub fn event_line(event: &TraceEvent, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    match event {
        TraceEvent::Call(call) => format!("{indent}→ {} {}", call.id, call.signature()),
        TraceEvent::Return(ret) => format!("{indent}← {} {}", ret.id, ret.value),
    }
}

#[must_use]
pub fn render_stats(stats: &TraceStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "calls: {}", stats.total_calls);
    let _ = writeln!(out, "base cases: {}", stats.base_case_calls);
    let _ = writeln!(out, "max depth: {}", stats.max_depth);
    if stats.has_redundancy() {
        let _ = writeln!(out, "redundant computations: {} wasted call(s)", stats.wasted_calls());
        for call in &stats.redundant_calls {
            let _ = writeln!(out, "  {} x{}", call.signature, call.count);
        }
    }
    out
}

/// Size / calls table, with the reference column when one is given
#[must_use]
pub fn render_samples(samples: &[ComplexitySample], reference: &[f64]) -> String {
    if samples.is_empty() {
        return "(no samples)\n".to_string();
    }
    let mut out = String::from("size   calls   reference\n");
    for (i, sample) in samples.iter().enumerate() {
        let _ = write!(out, "{:>4}   {:>5}", sample.size, sample.operation_count);
        match reference.get(i) {
            Some(r) => {
                let _ = writeln!(out, "   {r:>9.1}");
            }
            None => out.push('\n'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CallEvent, ReturnEvent, Value};

    fn node(id: u64, n: i64, value: Option<i64>, children: Vec<CallTreeNode>) -> CallTreeNode {
        CallTreeNode {
            id: CallId(id),
            function_name: "f".to_string(),
            arguments: vec![Value::Int(n)],
            return_value: value.map(Value::Int),
            children,
        }
    }

    #[test]
    fn test_tree_connectors() {
        let root = node(0, 2, None, vec![node(1, 1, Some(1), vec![node(3, 0, None, vec![])]), node(2, 0, Some(0), vec![])]);
        let text = render_tree(Some(&root));
        assert_eq!(text, "f(2) …\n├── f(1) = 1\n│   └── f(0) …\n└── f(0) = 0\n");
    }

    #[test]
    fn test_stack_innermost_first() {
        let frames = vec![
            CallStackFrame { id: CallId(0), function_name: "f".into(), arguments: vec![Value::Int(2)] },
            CallStackFrame { id: CallId(1), function_name: "f".into(), arguments: vec![Value::Int(1)] },
        ];
        let text = render_stack(&frames);
        assert!(text.starts_with("▶   1  f(1)"));
        assert_eq!(render_stack(&[]), "(empty stack)\n");
    }

    #[test]
    fn test_event_line() {
        let call = TraceEvent::Call(CallEvent {
            id: CallId(1),
            parent_id: Some(CallId(0)),
            function_name: "f".into(),
            arguments: vec![Value::Int(1)],
        });
        assert_eq!(event_line(&call, 1), "  → #1 f(1)");
        let ret = TraceEvent::Return(ReturnEvent { id: CallId(1), value: Value::Int(1) });
        assert_eq!(event_line(&ret, 0), "← #1 1");
    }

    #[test]
    fn test_samples_table() {
        let samples = [ComplexitySample { size: 1, operation_count: 1 }];
        assert_eq!(render_samples(&samples, &[1.0]), "size   calls   reference\n   1       1         1.0\n");
        assert_eq!(render_samples(&[], &[]), "(no samples)\n");
    }
}
