//! Deterministic A* pathfinding on walkability grids.
//!
//! [`PathFinder::find`] returns the cheapest route between two cells of any
//! [`Walkable`] map (typically a [`tilepath_core::GridMap`]), moving in 4
//! directions or, with diagonal movement enabled, in 8. Diagonal steps
//! never squeeze between two obstacles that meet at a corner.
//!
//! Costs are integers: 10 per cardinal step and 14 per diagonal step by
//! default, configurable through [`CostModel`]. Among equally cheap routes
//! the same one is chosen every time: the open node with the lowest
//! `g + h` is expanded first, then the one with the lowest `h`, then the
//! one discovered first.
//!
//! The finder reuses its node arena and open set between calls, so
//! repeated searches allocate little once warmed up.

mod cost;
mod finder;
mod frontier;
mod moves;
mod nodes;
mod path;
mod traits;

pub use cost::{CARDINAL_COST, CostError, CostModel, DIAGONAL_COST, chebyshev, manhattan, octile};
pub use finder::{PathError, PathFinder, SearchStats};
pub use moves::Moves;
pub use path::{Path, PathOutcome};
pub use traits::Walkable;
