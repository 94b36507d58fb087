//! Per-search node arena.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. A slot
//! table maps each cell to its node for the current search only; slots are
//! tagged with a generation so that [`NodeStore::reset`] is O(1) and no
//! node survives from one search into the next.

use tilepath_core::{Point, Range};

/// Index of a node in the arena. Ids are handed out in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeState {
    Unvisited,
    Open,
    Closed,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) pos: Point,
    pub(crate) g: i64,
    pub(crate) h: i64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) state: NodeState,
}

impl Node {
    #[inline]
    pub(crate) fn f(&self) -> i64 {
        self.g.saturating_add(self.h)
    }
}

#[derive(Clone, Copy, Default)]
struct Slot {
    generation: u32,
    id: usize,
}

#[derive(Default)]
pub(crate) struct NodeStore {
    bounds: Range,
    slots: Vec<Slot>,
    nodes: Vec<Node>,
    // Never 0 after the first reset, so default slots never match.
    generation: u32,
}

impl NodeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drop every node and size the slot table for `bounds`.
    pub(crate) fn reset(&mut self, bounds: Range) {
        self.nodes.clear();
        self.bounds = bounds;
        if self.slots.len() < bounds.len() {
            self.slots.resize(bounds.len(), Slot::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.slots.fill(Slot::default());
            self.generation = 1;
        }
    }

    /// Number of nodes created since the last reset.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The node for `p`, if one was created in this search.
    #[inline]
    pub(crate) fn get(&self, p: Point) -> Option<NodeId> {
        let slot = self.slots[self.bounds.index_of(p)?];
        (slot.generation == self.generation).then_some(NodeId(slot.id))
    }

    /// The node for `p`, creating an `Unvisited` one if needed. `None` if
    /// `p` lies outside the bounds given to [`NodeStore::reset`].
    pub(crate) fn get_or_create(&mut self, p: Point) -> Option<NodeId> {
        let idx = self.bounds.index_of(p)?;
        let slot = &mut self.slots[idx];
        if slot.generation == self.generation {
            return Some(NodeId(slot.id));
        }
        let id = self.nodes.len();
        *slot = Slot {
            generation: self.generation,
            id,
        };
        self.nodes.push(Node {
            pos: p,
            g: 0,
            h: 0,
            parent: None,
            state: NodeState::Unvisited,
        });
        Some(NodeId(id))
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn mark_open(&mut self, id: NodeId, g: i64, h: i64, parent: Option<NodeId>) {
        let n = &mut self.nodes[id.0];
        n.g = g;
        n.h = h;
        n.parent = parent;
        n.state = NodeState::Open;
    }

    pub(crate) fn mark_closed(&mut self, id: NodeId) {
        self.nodes[id.0].state = NodeState::Closed;
    }

    /// Record a cheaper route to an open node. Closed nodes are final and
    /// are never improved.
    pub(crate) fn try_improve(&mut self, id: NodeId, g: i64, parent: NodeId) -> bool {
        let n = &mut self.nodes[id.0];
        if n.state == NodeState::Closed || g >= n.g {
            return false;
        }
        n.g = g;
        n.parent = Some(parent);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(w: i32, h: i32) -> NodeStore {
        let mut s = NodeStore::new();
        s.reset(Range::sized(w, h));
        s
    }

    #[test]
    fn one_node_per_cell() {
        let mut s = store(4, 4);
        let p = Point::new(1, 2);
        assert_eq!(s.get(p), None);
        let a = s.get_or_create(p).unwrap();
        let b = s.get_or_create(p).unwrap();
        assert_eq!(a, b);
        assert_eq!(s.len(), 1);
        assert_eq!(s.node(a).state, NodeState::Unvisited);
        assert_eq!(s.node(a).pos, p);
        assert_eq!(s.get(p), Some(a));
    }

    #[test]
    fn ids_follow_creation_order() {
        let mut s = store(4, 4);
        let a = s.get_or_create(Point::new(3, 3)).unwrap();
        let b = s.get_or_create(Point::new(0, 0)).unwrap();
        assert!(a < b);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut s = store(2, 2);
        assert_eq!(s.get_or_create(Point::new(2, 0)), None);
        assert_eq!(s.get(Point::new(-1, 0)), None);
    }

    #[test]
    fn open_improve_close() {
        let mut s = store(5, 5);
        let root = s.get_or_create(Point::new(0, 0)).unwrap();
        let other = s.get_or_create(Point::new(0, 1)).unwrap();
        let n = s.get_or_create(Point::new(1, 1)).unwrap();
        s.mark_open(root, 0, 20, None);
        s.mark_open(n, 28, 30, Some(root));
        assert_eq!(s.node(n).f(), 58);

        assert!(!s.try_improve(n, 28, other));
        assert!(s.try_improve(n, 20, other));
        assert_eq!(s.node(n).g, 20);
        assert_eq!(s.node(n).h, 30);
        assert_eq!(s.node(n).parent, Some(other));

        s.mark_closed(n);
        assert!(!s.try_improve(n, 0, root));
        assert_eq!(s.node(n).g, 20);
    }

    #[test]
    fn reset_discards_previous_search() {
        let mut s = store(3, 3);
        let p = Point::new(2, 2);
        let id = s.get_or_create(p).unwrap();
        s.mark_closed(id);
        s.reset(Range::sized(3, 3));
        assert_eq!(s.get(p), None);
        assert_eq!(s.len(), 0);
        let fresh = s.get_or_create(p).unwrap();
        assert_eq!(s.node(fresh).state, NodeState::Unvisited);
    }

    #[test]
    fn reset_to_larger_bounds_grows_slots() {
        let mut s = store(2, 2);
        s.reset(Range::sized(10, 10));
        assert!(s.get_or_create(Point::new(9, 9)).is_some());
        s.reset(Range::sized(2, 2));
        assert_eq!(s.get(Point::new(9, 9)), None);
        assert!(s.get_or_create(Point::new(1, 1)).is_some());
    }

    #[test]
    fn generation_wrap_clears_slots() {
        let mut s = store(2, 2);
        s.get_or_create(Point::new(1, 0)).unwrap();
        s.generation = u32::MAX;
        s.reset(Range::sized(2, 2));
        assert_eq!(s.generation, 1);
        assert_eq!(s.get(Point::new(1, 0)), None);
    }
}
