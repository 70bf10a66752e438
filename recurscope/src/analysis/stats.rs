//! Whole-run statistics over a trace.
//!
//! Counts come from the reconstructed tree so partial traces (a run that
//! raised) are summarized the same way as complete ones.

use serde::Serialize;
use std::collections::HashMap;

use crate::reconstruct::reconstruct_tree;
use crate::trace_data::Trace;

/// A call signature that was entered more than once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedundantCall {
    /// `name(args)` of the repeated call
    pub signature: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStats {
    pub total_calls: usize,
    /// Calls that made no recursive call of their own
    pub base_case_calls: usize,
    /// Deepest nesting below the root, in edges
    pub max_depth: usize,
    /// Repeated signatures in first-seen order
    pub redundant_calls: Vec<RedundantCall>,
}

impl TraceStats {
    #[must_use]
    pub fn from_trace(trace: &Trace) -> Self {
        let Some(last) = trace.last_index() else {
            return Self::default();
        };
        let Some(root) = reconstruct_tree(trace, last) else {
            return Self::default();
        };

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for node in root.iter() {
            let signature = node.signature();
            let count = counts.entry(signature.clone()).or_insert(0);
            if *count == 0 {
                order.push(signature);
            }
            *count += 1;
        }

        let redundant_calls = order
            .into_iter()
            .filter_map(|signature| {
                let count = counts.get(&signature).copied().unwrap_or(0);
                (count > 1).then_some(RedundantCall { signature, count })
            })
            .collect();

        Self {
            total_calls: root.node_count(),
            base_case_calls: root.iter().filter(|n| n.is_leaf()).count(),
            max_depth: root.height(),
            redundant_calls,
        }
    }

    /// Whether any call signature repeats
    #[must_use]
    pub fn has_redundancy(&self) -> bool {
        !self.redundant_calls.is_empty()
    }

    /// Calls that repeated work already done elsewhere
    #[must_use]
    pub fn wasted_calls(&self) -> usize {
        self.redundant_calls.iter().map(|r| r.count - 1).sum()
    }
}
