//! **tilepath-core** — grid geometry and walkability maps.
//!
//! This crate provides the foundational types shared by the *tilepath*
//! crates: integer cell coordinates, half-open rectangles, and the
//! [`GridMap`] walkability matrix that searches read from.

pub mod geom;
pub mod gridmap;

pub use geom::{Point, Range, RangeIter};
pub use gridmap::{FLOOR, GridError, GridMap, WALL};
