//! A boolean walkability grid.
//!
//! [`GridMap`] is the sole source of truth for which cells an agent may
//! enter. It holds no search state, so one map can be shared by any number
//! of searches and reused across frames.

use std::fmt;

use crate::geom::{Point, Range};

/// Character marking a walkable cell in [`GridMap::parse`] input.
pub const FLOOR: char = '.';
/// Character marking an obstacle in [`GridMap::parse`] input.
pub const WALL: char = '#';

/// A `width` × `height` matrix of walkability flags.
///
/// Coordinates outside `[0, width) x [0, height)` are rejected with
/// [`GridError::OutOfBounds`], never clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridMapData")
)]
pub struct GridMap {
    width: i32,
    height: i32,
    /// Row-major, `true` = walkable.
    cells: Vec<bool>,
}

impl GridMap {
    /// Create a map with every cell walkable.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![true; width as usize * height as usize],
        })
    }

    /// Build a map from text rows of `.` (walkable) and `#` (obstacle).
    ///
    /// ```
    /// use tilepath_core::GridMap;
    ///
    /// let map = GridMap::parse("..#\n...").unwrap();
    /// assert_eq!(map.width(), 3);
    /// assert_eq!(map.obstacle_count(), 1);
    /// ```
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        let width = i32::try_from(rows.first().map_or(0, |r| r.chars().count()));
        let height = i32::try_from(rows.len());
        let (Ok(width), Ok(height)) = (width, height) else {
            return Err(GridError::InvalidDimension {
                width: width.unwrap_or(i32::MAX),
                height: height.unwrap_or(i32::MAX),
            });
        };
        let mut map = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width as usize {
                return Err(GridError::InconsistentSize {
                    line: y,
                    expected: width as usize,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    FLOOR => {}
                    WALL => map.set_obstacle(pos, true)?,
                    _ => return Err(GridError::InvalidRune { ch, pos }),
                }
            }
        }
        Ok(map)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The range `[0, width) x [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::sized(self.width, self.height)
    }

    fn index(&self, p: Point) -> Result<usize, GridError> {
        self.bounds().index_of(p).ok_or(GridError::OutOfBounds(p))
    }

    /// Mark `p` walkable (`true`) or blocked (`false`).
    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> Result<(), GridError> {
        let idx = self.index(p)?;
        self.cells[idx] = walkable;
        Ok(())
    }

    /// Mark `p` as an obstacle (`true`) or clear it (`false`).
    pub fn set_obstacle(&mut self, p: Point, obstacle: bool) -> Result<(), GridError> {
        self.set_walkable(p, !obstacle)
    }

    /// Whether `p` may be entered.
    pub fn is_walkable(&self, p: Point) -> Result<bool, GridError> {
        Ok(self.cells[self.index(p)?])
    }

    /// Whether `p` holds an obstacle.
    pub fn is_obstacle(&self, p: Point) -> Result<bool, GridError> {
        self.is_walkable(p).map(|w| !w)
    }

    /// Like [`GridMap::is_walkable`], but cells outside the map read as
    /// blocked instead of failing.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.bounds().index_of(p).is_some_and(|i| self.cells[i])
    }

    /// Set every cell to the same walkability.
    pub fn fill(&mut self, walkable: bool) {
        self.cells.fill(walkable);
    }

    /// Number of blocked cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&w| !w).count()
    }

    /// Iterate over `(Point, walkable)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

/// Unvalidated wire form of a [`GridMap`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridMapData {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridMapData> for GridMap {
    type Error = GridError;

    fn try_from(data: GridMapData) -> Result<Self, GridError> {
        let mut map = GridMap::new(data.width, data.height)?;
        if data.cells.len() != map.cells.len() {
            return Err(GridError::InconsistentSize {
                line: 0,
                expected: map.cells.len(),
                found: data.cells.len(),
            });
        }
        map.cells = data.cells;
        Ok(map)
    }
}

/// Errors reported by [`GridMap`] construction and cell access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was zero or negative.
    InvalidDimension { width: i32, height: i32 },
    /// A coordinate fell outside the map.
    OutOfBounds(Point),
    /// Parsed rows (or serialized cells) disagree on the map width.
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Parsed text contained something other than `.` or `#`.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "grid: invalid dimension {width}x{height}")
            }
            Self::OutOfBounds(p) => write!(f, "grid: {p} is out of bounds"),
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "grid: inconsistent size at line {line}: expected {expected} cells, found {found}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "grid: invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn gridmap_round_trip() {
        let m = GridMap::parse(".#.\n...").unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: GridMap = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn gridmap_rejects_bad_cell_count() {
        let json = r#"{"width":2,"height":2,"cells":[true,true,false]}"#;
        assert!(serde_json::from_str::<GridMap>(json).is_err());
        let json = r#"{"width":0,"height":2,"cells":[]}"#;
        assert!(serde_json::from_str::<GridMap>(json).is_err());
    }
}
