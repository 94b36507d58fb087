//! The open set.
//!
//! Ordering: smallest `f` first, then smallest `h` (closer to the goal),
//! then earliest inserted. Nodes are created at the moment they are first
//! opened, so insertion order is [`NodeId`] order, and a reprioritized node
//! keeps its original place among equals.
//!
//! The heap stores keys only. A cost improvement pushes a second entry for
//! the same node; outdated entries are discarded when they surface.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tilepath_core::Point;

use crate::nodes::{NodeId, NodeState, NodeStore};

/// Returned by [`Frontier::pop_best`] when no open node remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrontierEmpty;

#[derive(Clone, Copy, PartialEq, Eq)]
struct Entry {
    f: i64,
    h: i64,
    id: NodeId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    live: usize,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.live = 0;
    }

    /// Number of distinct open nodes waiting to be expanded.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn entry(nodes: &NodeStore, id: NodeId) -> Entry {
        let n = nodes.node(id);
        Entry { f: n.f(), h: n.h, id }
    }

    /// Add a freshly opened node.
    pub(crate) fn push(&mut self, nodes: &NodeStore, id: NodeId) {
        self.heap.push(Self::entry(nodes, id));
        self.live += 1;
    }

    /// Re-rank a node already in the frontier after its cost dropped.
    pub(crate) fn reprioritize(&mut self, nodes: &NodeStore, id: NodeId) {
        self.heap.push(Self::entry(nodes, id));
    }

    /// Whether `p` has an open node waiting in the frontier.
    pub(crate) fn contains(&self, nodes: &NodeStore, p: Point) -> bool {
        nodes
            .get(p)
            .is_some_and(|id| nodes.node(id).state == NodeState::Open)
    }

    /// Remove and return the best open node.
    pub(crate) fn pop_best(&mut self, nodes: &NodeStore) -> Result<NodeId, FrontierEmpty> {
        while let Some(e) = self.heap.pop() {
            let n = nodes.node(e.id);
            if n.state != NodeState::Open || n.f() != e.f {
                continue;
            }
            self.live -= 1;
            return Ok(e.id);
        }
        Err(FrontierEmpty)
    }
}
