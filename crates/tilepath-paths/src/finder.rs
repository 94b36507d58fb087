use std::fmt;

use tilepath_core::Point;

use crate::cost::CostModel;
use crate::frontier::{Frontier, FrontierEmpty};
use crate::moves::Moves;
use crate::nodes::{NodeId, NodeState, NodeStore};
use crate::path::{Path, PathOutcome};
use crate::traits::Walkable;

/// Counters for the most recent [`PathFinder::find`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier and closed.
    pub expanded: usize,
    /// Nodes opened (the start node included).
    pub pushed: usize,
}

/// A* search over a [`Walkable`] grid.
///
/// The finder owns its node arena and open set and reuses them across
/// calls; the grid is only borrowed for the duration of each
/// [`find`](PathFinder::find). One finder runs one search at a time
/// (`find` takes `&mut self`); give each agent or thread its own.
///
/// ```
/// use tilepath_core::{GridMap, Point};
/// use tilepath_paths::PathFinder;
///
/// let map = GridMap::parse("...\n.#.\n...").unwrap();
/// let mut finder = PathFinder::new(false);
/// let outcome = finder.find(&map, Point::new(0, 0), Point::new(2, 2)).unwrap();
/// assert_eq!(outcome.path().unwrap().len(), 5);
/// ```
pub struct PathFinder {
    cost: CostModel,
    nodes: NodeStore,
    frontier: Frontier,
    moves: Moves,
    stats: SearchStats,
}

impl Default for PathFinder {
    /// Diagonal movement enabled, default unit costs.
    fn default() -> Self {
        Self::with_cost_model(CostModel::default())
    }
}

impl PathFinder {
    /// Create a finder with default unit costs.
    pub fn new(diagonal: bool) -> Self {
        Self::with_cost_model(CostModel::new(diagonal))
    }

    pub fn with_cost_model(cost: CostModel) -> Self {
        Self {
            cost,
            nodes: NodeStore::new(),
            frontier: Frontier::new(),
            moves: Moves::new(),
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn cost_model(&self) -> CostModel {
        self.cost
    }

    pub fn set_cost_model(&mut self, cost: CostModel) {
        self.cost = cost;
    }

    /// Whether 8-way movement is enabled.
    #[inline]
    pub fn diagonal(&self) -> bool {
        self.cost.diagonal_enabled()
    }

    /// Switch between 4-way and 8-way movement for later searches.
    pub fn set_diagonal(&mut self, enabled: bool) {
        self.cost.set_diagonal_enabled(enabled);
    }

    /// Counters for the most recent search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Find a cheapest path from `start` to `dest`.
    ///
    /// Endpoint problems are reported as [`PathError`] before any search
    /// runs. An unreachable destination is the ordinary
    /// [`PathOutcome::NotFound`]. Equal-cost alternatives are resolved the
    /// same way every time, so an unchanged map and unchanged endpoints
    /// always give the same path.
    pub fn find<W: Walkable + ?Sized>(
        &mut self,
        map: &W,
        start: Point,
        dest: Point,
    ) -> Result<PathOutcome, PathError> {
        let bounds = map.bounds();
        if !bounds.contains(start) {
            return Err(PathError::StartOutOfBounds(start));
        }
        if !bounds.contains(dest) {
            return Err(PathError::DestOutOfBounds(dest));
        }
        if !map.is_passable(start) {
            return Err(PathError::StartBlocked(start));
        }
        if !map.is_passable(dest) {
            return Err(PathError::DestBlocked(dest));
        }

        self.stats = SearchStats::default();
        if start == dest {
            log::trace!("path {start} -> {dest}: trivial");
            return Ok(PathOutcome::Found(Path::new(vec![start], 0)));
        }

        let outcome = match self.search(map, start, dest) {
            Ok(goal) => PathOutcome::Found(self.extract_path(goal)),
            Err(FrontierEmpty) => PathOutcome::NotFound,
        };
        match &outcome {
            PathOutcome::Found(path) => log::debug!(
                "path {start} -> {dest}: {} cells, cost {}, {} expanded, {} created",
                path.len(),
                path.cost(),
                self.stats.expanded,
                self.nodes.len(),
            ),
            PathOutcome::NotFound => log::debug!(
                "path {start} -> {dest}: not found, {} expanded",
                self.stats.expanded,
            ),
        }
        Ok(outcome)
    }

    /// Run A* until `dest` is closed or the frontier runs dry.
    fn search<W: Walkable + ?Sized>(
        &mut self,
        map: &W,
        start: Point,
        dest: Point,
    ) -> Result<NodeId, FrontierEmpty> {
        let cost = self.cost;
        let diagonal = cost.diagonal_enabled();
        self.nodes.reset(map.bounds());
        self.frontier.clear();

        let Some(start_id) = self.nodes.get_or_create(start) else {
            return Err(FrontierEmpty);
        };
        self.nodes
            .mark_open(start_id, 0, cost.heuristic(start, dest), None);
        self.frontier.push(&self.nodes, start_id);
        self.stats.pushed += 1;

        let mut moves = std::mem::take(&mut self.moves);

        let result = loop {
            if self.frontier.is_empty() {
                break Err(FrontierEmpty);
            }
            let current = match self.frontier.pop_best(&self.nodes) {
                Ok(id) => id,
                Err(e) => break Err(e),
            };
            self.nodes.mark_closed(current);
            self.stats.expanded += 1;

            let (cp, cg) = {
                let n = self.nodes.node(current);
                (n.pos, n.g)
            };
            if cp == dest {
                break Ok(current);
            }

            for &np in moves.legal(map, cp, diagonal) {
                let Some(ni) = self.nodes.get_or_create(np) else {
                    continue;
                };
                let tentative_g = cg.saturating_add(cost.step_cost(cp, np));
                match self.nodes.node(ni).state {
                    NodeState::Closed => {}
                    NodeState::Unvisited => {
                        self.nodes
                            .mark_open(ni, tentative_g, cost.heuristic(np, dest), Some(current));
                        self.frontier.push(&self.nodes, ni);
                        self.stats.pushed += 1;
                    }
                    NodeState::Open => {
                        debug_assert!(self.frontier.contains(&self.nodes, np));
                        if self.nodes.try_improve(ni, tentative_g, current) {
                            self.frontier.reprioritize(&self.nodes, ni);
                        }
                    }
                }
            }
        };

        self.moves = moves;
        log::trace!("frontier left with {} open nodes", self.frontier.len());
        result
    }

    /// Follow parent links from `goal` back to the start.
    fn extract_path(&self, goal: NodeId) -> Path {
        let mut points = Vec::new();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            let n = self.nodes.node(id);
            points.push(n.pos);
            cur = n.parent;
        }
        points.reverse();
        Path::new(points, self.nodes.node(goal).g)
    }
}

/// Endpoint errors detected before a search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    StartOutOfBounds(Point),
    DestOutOfBounds(Point),
    StartBlocked(Point),
    DestBlocked(Point),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartOutOfBounds(p) => write!(f, "path: start {p} is out of bounds"),
            Self::DestOutOfBounds(p) => write!(f, "path: destination {p} is out of bounds"),
            Self::StartBlocked(p) => write!(f, "path: start {p} is blocked"),
            Self::DestBlocked(p) => write!(f, "path: destination {p} is blocked"),
        }
    }
}

impl std::error::Error for PathError {}


#[cfg(test)]
mod property_tests {
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use tilepath_core::GridMap;

    use super::*;

    fn random_map(rng: &mut StdRng, w: i32, h: i32, wall_pct: u32) -> GridMap {
        let mut map = GridMap::new(w, h).unwrap();
        for p in map.bounds() {
            if rng.random_range(0..100) < wall_pct {
                map.set_obstacle(p, true).unwrap();
            }
        }
        map
    }

    /// Uniform-cost search with the same move rules, used as ground truth.
    fn reference_cost(map: &GridMap, model: CostModel, s: Point, d: Point) -> Option<i64> {
        let bounds = map.bounds();
        let mut dist = vec![i64::MAX; bounds.len()];
        let mut heap = BinaryHeap::new();
        let mut moves = Moves::new();
        dist[bounds.index_of(s)?] = 0;
        heap.push(Reverse((0, bounds.index_of(s)?)));
        while let Some(Reverse((g, i))) = heap.pop() {
            if g > dist[i] {
                continue;
            }
            let p = bounds.point_at(i);
            if p == d {
                return Some(g);
            }
            for &n in moves.legal(map, p, model.diagonal_enabled()) {
                let ni = bounds.index_of(n)?;
                let ng = g + model.step_cost(p, n);
                if ng < dist[ni] {
                    dist[ni] = ng;
                    heap.push(Reverse((ng, ni)));
                }
            }
        }
        None
    }

    #[test]
    fn matches_reference_on_random_maps() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut moves = Moves::new();
        for round in 0..200 {
            let w = rng.random_range(1..16);
            let h = rng.random_range(1..16);
            let map = random_map(&mut rng, w, h, 30);
            let s = Point::new(rng.random_range(0..w), rng.random_range(0..h));
            let d = Point::new(rng.random_range(0..w), rng.random_range(0..h));
            let diagonal = round % 2 == 0;
            let model = CostModel::new(diagonal);
            let mut pf = PathFinder::with_cost_model(model);

            let result = pf.find(&map, s, d);
            if !map.is_passable(s) {
                assert_eq!(result, Err(PathError::StartBlocked(s)));
                continue;
            }
            if !map.is_passable(d) {
                assert_eq!(result, Err(PathError::DestBlocked(d)));
                continue;
            }
            let expected = reference_cost(&map, model, s, d);
            match result.unwrap() {
                PathOutcome::Found(path) => {
                    assert_eq!(Some(path.cost()), expected, "round {round}");
                    assert_eq!(path.start(), s);
                    assert_eq!(path.dest(), d);
                    for (a, b) in path.moves() {
                        assert!(moves.is_legal(&map, a, b, diagonal), "round {round}: {a} -> {b}");
                    }
                    assert!(path.iter().all(|&p| map.is_passable(p)));
                }
                PathOutcome::NotFound => assert_eq!(expected, None, "round {round}"),
            }
        }
    }

    #[test]
    fn large_costs_match_reference_on_random_maps() {
        let mut rng = StdRng::seed_from_u64(2024);
        let models = [
            CostModel::with_costs(1_000_000_000, 1_000_000_000, false).unwrap(),
            CostModel::with_costs(1_000_000_000, 2_000_000_000, true).unwrap(),
            CostModel::with_costs(i32::MAX / 2, i32::MAX - 1, true).unwrap(),
        ];
        for round in 0..60 {
            let model = models[round % models.len()];
            let w = rng.random_range(2..16);
            let h = rng.random_range(2..16);
            let mut map = random_map(&mut rng, w, h, 25);
            let s = Point::new(0, 0);
            let d = Point::new(w - 1, h - 1);
            map.set_walkable(s, true).unwrap();
            map.set_walkable(d, true).unwrap();

            let mut pf = PathFinder::with_cost_model(model);
            let expected = reference_cost(&map, model, s, d);
            match pf.find(&map, s, d).unwrap() {
                PathOutcome::Found(path) => {
                    assert!(path.cost() > 0, "round {round}");
                    assert_eq!(Some(path.cost()), expected, "round {round}");
                }
                PathOutcome::NotFound => assert_eq!(expected, None, "round {round}"),
            }
        }
    }

    #[test]
    fn reused_finder_agrees_with_fresh_finders() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut shared = PathFinder::default();
        for _ in 0..50 {
            let w = rng.random_range(2..20);
            let h = rng.random_range(2..20);
            let mut map = random_map(&mut rng, w, h, 25);
            let s = Point::new(0, 0);
            let d = Point::new(w - 1, h - 1);
            map.set_walkable(s, true).unwrap();
            map.set_walkable(d, true).unwrap();
            let mut fresh = PathFinder::default();
            assert_eq!(shared.find(&map, s, d), fresh.find(&map, s, d));
        }
    }
}
