//! Call-tree reconstruction from a trace prefix.
//!
//! The tree is rebuilt from scratch for every prefix: a single pass over
//! `trace[0..=upto]` fills a scratch arena keyed by call id, then the arena is
//! folded into an owned [`CallTreeNode`] hierarchy. Nothing is updated
//! incrementally, so a node obtained for one prefix never changes.

use log::warn;
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{CallId, MalformedTrace, TraceEvent, Value};
use crate::trace_data::Trace;

/// One call in a reconstructed tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTreeNode {
    pub id: CallId,
    pub function_name: String,
    pub arguments: Vec<Value>,
    /// Present once the return event is inside the prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
    /// Ordered by call order
    pub children: Vec<CallTreeNode>,
}

impl CallTreeNode {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.return_value.is_some()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// `name(a, b)`
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.function_name, recurscope_common::join_values(&self.arguments))
    }

    /// Nodes in this subtree, including `self`
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Nodes in this subtree that have returned
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.iter().filter(|n| n.is_resolved()).count()
    }

    /// Longest root-to-leaf path, counted in edges
    #[must_use]
    pub fn height(&self) -> usize {
        self.children.iter().map(|c| c.height() + 1).max().unwrap_or(0)
    }

    #[must_use]
    pub fn find(&self, id: CallId) -> Option<&CallTreeNode> {
        self.iter().find(|n| n.id == id)
    }

    /// Pre-order traversal
    pub fn iter(&self) -> impl Iterator<Item = &CallTreeNode> {
        let mut pending = vec![self];
        std::iter::from_fn(move || {
            let node = pending.pop()?;
            pending.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// Scratch node: children held as arena indices until the final fold
struct ArenaNode {
    id: CallId,
    function_name: String,
    arguments: Vec<Value>,
    return_value: Option<Value>,
    children: Vec<usize>,
}

/// Rebuild the call tree as it stood after event `upto` (inclusive).
///
/// Returns `None` when the prefix holds no call event. An `upto` past the end
/// covers the whole trace. Malformed input is logged and skipped: only the
/// first root is kept, orphans and duplicate ids are dropped, returns for
/// unknown ids are ignored.
#[must_use]
pub fn reconstruct_tree(trace: &Trace, upto: usize) -> Option<CallTreeNode> {
    let prefix = trace.events().get(..=upto).unwrap_or(trace.events());

    let mut arena: Vec<ArenaNode> = Vec::new();
    let mut index_of: HashMap<CallId, usize> = HashMap::new();
    let mut root: Option<usize> = None;

    for event in prefix {
        match event {
            TraceEvent::Call(call) => {
                if index_of.contains_key(&call.id) {
                    report(&MalformedTrace::DuplicateCall { id: call.id });
                    continue;
                }
                let parent_slot = match call.parent_id {
                    None => None,
                    Some(parent) => match index_of.get(&parent) {
                        Some(&slot) => Some(slot),
                        None => {
                            report(&MalformedTrace::OrphanCall { id: call.id, parent });
                            continue;
                        }
                    },
                };

                let slot = arena.len();
                arena.push(ArenaNode {
                    id: call.id,
                    function_name: call.function_name.clone(),
                    arguments: call.arguments.clone(),
                    return_value: None,
                    children: Vec::new(),
                });
                index_of.insert(call.id, slot);

                match parent_slot {
                    Some(parent) => arena[parent].children.push(slot),
                    None => match root {
                        None => root = Some(slot),
                        Some(kept) => report(&MalformedTrace::DuplicateRoot {
                            kept: arena[kept].id,
                            extra: call.id,
                        }),
                    },
                }
            }
            TraceEvent::Return(ret) => match index_of.get(&ret.id) {
                Some(&slot) => arena[slot].return_value = Some(ret.value.clone()),
                None => report(&MalformedTrace::UnmatchedReturn { id: ret.id }),
            },
        }
    }

    root.map(|slot| fold(&mut arena, slot))
}

/// Move an arena subtree into owned nodes
fn fold(arena: &mut [ArenaNode], slot: usize) -> CallTreeNode {
    let children = std::mem::take(&mut arena[slot].children);
    let children = children.into_iter().map(|child| fold(arena, child)).collect();
    let node = &mut arena[slot];
    CallTreeNode {
        id: node.id,
        function_name: std::mem::take(&mut node.function_name),
        arguments: std::mem::take(&mut node.arguments),
        return_value: node.return_value.take(),
        children,
    }
}

fn report(problem: &MalformedTrace) {
    warn!("malformed trace: {problem}");
}
