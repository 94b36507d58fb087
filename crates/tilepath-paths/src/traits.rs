use tilepath_core::{GridMap, Point, Range};

/// Walkability source for a search.
///
/// Level representations (tile maps, collision layers) implement this to be
/// searchable without first copying into a [`GridMap`].
pub trait Walkable {
    /// The rectangle of valid cells. Must be non-empty.
    fn bounds(&self) -> Range;

    /// Whether `p` may be entered. Only called for points inside
    /// [`Walkable::bounds`].
    fn is_passable(&self, p: Point) -> bool;
}

impl Walkable for GridMap {
    #[inline]
    fn bounds(&self) -> Range {
        GridMap::bounds(self)
    }

    #[inline]
    fn is_passable(&self, p: Point) -> bool {
        GridMap::is_passable(self, p)
    }
}
