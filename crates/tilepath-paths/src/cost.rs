//! Movement costs and distance heuristics.
//!
//! Costs are integer-scaled so that a diagonal step (≈ √2) can be priced
//! without floating point: 10 per cardinal step, 14 per diagonal step.
//! Unit costs are `i32`; accumulated costs and estimates are `i64` and
//! saturate instead of wrapping, so any accepted model is safe on any map.

use std::fmt;

use tilepath_core::Point;

/// Default cost of a horizontal or vertical step.
pub const CARDINAL_COST: i32 = 10;
/// Default cost of a diagonal step.
pub const DIAGONAL_COST: i32 = 14;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i64 {
    let (dx, dy) = abs_deltas(a, b);
    dx + dy
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i64 {
    let (dx, dy) = abs_deltas(a, b);
    dx.max(dy)
}

/// Octile distance: the cost of the cheapest obstacle-free 8-way route
/// when straight steps cost `cardinal` and diagonal steps cost `diagonal`.
#[inline]
pub fn octile(a: Point, b: Point, cardinal: i32, diagonal: i32) -> i64 {
    let (dx, dy) = abs_deltas(a, b);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    i64::from(diagonal)
        .saturating_mul(lo)
        .saturating_add(i64::from(cardinal).saturating_mul(hi - lo))
}

// Widened before subtracting: i32 coordinates can be 2^32 apart.
#[inline]
fn abs_deltas(a: Point, b: Point) -> (i64, i64) {
    (
        (i64::from(a.x) - i64::from(b.x)).abs(),
        (i64::from(a.y) - i64::from(b.y)).abs(),
    )
}

/// Step cost and heuristic for one movement mode.
///
/// The heuristic is Manhattan distance (4-way) or octile distance (8-way),
/// both scaled by the configured unit costs. For any costs accepted by
/// [`CostModel::with_costs`] it never overestimates the remaining cost, so
/// a node closed by the search is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CostModelData")
)]
pub struct CostModel {
    cardinal: i32,
    diagonal: i32,
    diagonal_enabled: bool,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CostModel {
    /// Default unit costs (10 / 14).
    pub const fn new(diagonal_enabled: bool) -> Self {
        Self {
            cardinal: CARDINAL_COST,
            diagonal: DIAGONAL_COST,
            diagonal_enabled,
        }
    }

    /// Custom unit costs. Requires `0 < cardinal <= diagonal <= 2 * cardinal`.
    pub fn with_costs(
        cardinal: i32,
        diagonal: i32,
        diagonal_enabled: bool,
    ) -> Result<Self, CostError> {
        if cardinal <= 0 || diagonal < cardinal || diagonal > cardinal.saturating_mul(2) {
            return Err(CostError { cardinal, diagonal });
        }
        Ok(Self {
            cardinal,
            diagonal,
            diagonal_enabled,
        })
    }

    #[inline]
    pub fn cardinal_cost(&self) -> i32 {
        self.cardinal
    }

    #[inline]
    pub fn diagonal_cost(&self) -> i32 {
        self.diagonal
    }

    /// Whether 8-way movement is allowed.
    #[inline]
    pub fn diagonal_enabled(&self) -> bool {
        self.diagonal_enabled
    }

    pub fn set_diagonal_enabled(&mut self, enabled: bool) {
        self.diagonal_enabled = enabled;
    }

    /// Cost of moving from `from` to the adjacent cell `to`.
    #[inline]
    pub fn step_cost(&self, from: Point, to: Point) -> i64 {
        if from.x != to.x && from.y != to.y {
            i64::from(self.diagonal)
        } else {
            i64::from(self.cardinal)
        }
    }

    /// Estimated remaining cost from `from` to `to`.
    #[inline]
    pub fn heuristic(&self, from: Point, to: Point) -> i64 {
        if self.diagonal_enabled {
            octile(from, to, self.cardinal, self.diagonal)
        } else {
            i64::from(self.cardinal).saturating_mul(manhattan(from, to))
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CostModelData {
    cardinal: i32,
    diagonal: i32,
    diagonal_enabled: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<CostModelData> for CostModel {
    type Error = CostError;

    fn try_from(data: CostModelData) -> Result<Self, CostError> {
        Self::with_costs(data.cardinal, data.diagonal, data.diagonal_enabled)
    }
}

/// Unit costs rejected by [`CostModel::with_costs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostError {
    pub cardinal: i32,
    pub diagonal: i32,
}

impl fmt::Display for CostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cost: need 0 < cardinal <= diagonal <= 2 * cardinal, got cardinal {} and diagonal {}",
            self.cardinal, self.diagonal
        )
    }
}

impl std::error::Error for CostError {}
