use tilepath_core::Point;

use crate::traits::Walkable;

/// Reusable buffer of legal single-step moves.
///
/// A move is legal when its target is inside the map and walkable. In
/// 8-way mode a diagonal move additionally needs at least one of the two
/// orthogonally adjacent cells to be walkable, so agents never squeeze
/// between two obstacles that touch only at a corner.
pub struct Moves {
    buf: Vec<Point>,
}

impl Default for Moves {
    fn default() -> Self {
        Self::new()
    }
}

impl Moves {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Legal moves out of `p`, clockwise from north.
    pub fn legal<W: Walkable + ?Sized>(&mut self, map: &W, p: Point, diagonal: bool) -> &[Point] {
        self.buf.clear();
        let bounds = map.bounds();
        let open = |q: Point| bounds.contains(q) && map.is_passable(q);
        if !diagonal {
            self.buf.extend(p.neighbors_4().into_iter().filter(|&n| open(n)));
            return &self.buf;
        }
        for n in p.neighbors_8() {
            if !open(n) {
                continue;
            }
            let is_diagonal = n.x != p.x && n.y != p.y;
            if is_diagonal && !open(Point::new(n.x, p.y)) && !open(Point::new(p.x, n.y)) {
                continue;
            }
            self.buf.push(n);
        }
        &self.buf
    }

    /// Whether a single step from `from` to `to` is legal.
    pub fn is_legal<W: Walkable + ?Sized>(
        &mut self,
        map: &W,
        from: Point,
        to: Point,
        diagonal: bool,
    ) -> bool {
        self.legal(map, from, diagonal).contains(&to)
    }
}
