use tilepath_core::Point;

/// An ordered list of waypoints from start to destination, both included.
///
/// Consecutive waypoints are one legal step apart. A path always holds at
/// least one point; a search from a cell to itself yields exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    points: Vec<Point>,
    cost: i64,
}

impl Path {
    pub(crate) fn new(points: Vec<Point>, cost: i64) -> Self {
        debug_assert!(!points.is_empty());
        Self { points, cost }
    }

    /// The waypoints, start first.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of cells on the path (steps + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of moves along the path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    #[inline]
    pub fn dest(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Total movement cost under the cost model that produced the path.
    #[inline]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Consecutive `(from, to)` pairs.
    pub fn moves(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

impl IntoIterator for Path {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.points
    }
}

/// Result of a search that was allowed to run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PathOutcome {
    Found(Path),
    /// The reachable region was exhausted without meeting the destination.
    NotFound,
}

impl PathOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }
}
