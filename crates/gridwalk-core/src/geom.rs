//! Geometry primitives: [`Point`], [`Direction`] and [`Range`].
//!
//! Coordinates are signed so that stepping off the edge of a grid produces
//! a negative coordinate that bounds checks reject, rather than an
//! underflow.

use std::fmt;
use std::ops::Sub;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right, Y grows down, so "north" is `y - 1`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The point one step away in direction `d`.
    #[inline]
    pub const fn step(self, d: Direction) -> Self {
        let (dx, dy) = d.offset();
        self.shift(dx, dy)
    }

    /// Whether `other` is exactly one orthogonal or diagonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u8, u8)> for Point {
    fn from((x, y): (u8, u8)) -> Self {
        Self::new(x as i32, y as i32)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight grid moves.
///
/// The declaration order is the neighbour enumeration order used everywhere
/// in gridwalk: the four orthogonal moves clockwise from north, then the
/// four diagonals clockwise from north-east. Search tie-breaking depends on
/// it, so it must not be reordered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// The 4-connected moves, in enumeration order.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The diagonal moves, in enumeration order.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// `(dx, dy)` for one step in this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthWest => (-1, -1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    /// The two orthogonal components of a diagonal move, e.g. north and
    /// east for north-east. Orthogonal moves return themselves twice.
    #[inline]
    pub const fn components(self) -> (Direction, Direction) {
        match self {
            Direction::NorthEast => (Direction::North, Direction::East),
            Direction::SouthEast => (Direction::South, Direction::East),
            Direction::SouthWest => (Direction::South, Direction::West),
            Direction::NorthWest => (Direction::North, Direction::West),
            d => (d, d),
        }
    }

    /// The direction of a single step from `from` to `to`, if they are
    /// adjacent.
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        let d = to - from;
        Self::ORTHOGONAL
            .into_iter()
            .chain(Self::DIAGONAL)
            .find(|dir| dir.offset() == (d.x, d.y))
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// The range `[0, width) × [0, height)`.
    #[inline]
    pub const fn with_size(width: i32, height: i32) -> Self {
        Self {
            min: Point::ZERO,
            max: Point::new(width, height),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Row-major iterator over every point in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Row-major iterator over the points in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Point,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.cur.y >= self.range.max.y || self.range.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.range.max.x {
            self.cur.x = self.range.min.x;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let remaining_in_row = (self.range.max.x - self.cur.x) as usize;
        let remaining_rows = (self.range.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_step_follows_screen_axes() {
        let p = Point::new(2, 2);
        assert_eq!(p.step(Direction::North), Point::new(2, 1));
        assert_eq!(p.step(Direction::East), Point::new(3, 2));
        assert_eq!(p.step(Direction::SouthWest), Point::new(1, 3));
        assert_eq!(Point::ZERO.step(Direction::NorthWest), Point::new(-1, -1));
    }

    #[test]
    fn point_adjacency() {
        let p = Point::new(4, 4);
        assert!(p.is_adjacent(Point::new(5, 5)));
        assert!(p.is_adjacent(Point::new(4, 3)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Point::new(6, 4)));
    }

    #[test]
    fn point_from_bytes() {
        assert_eq!(Point::from((255u8, 7u8)), Point::new(255, 7));
    }

    #[test]
    fn direction_order_is_fixed() {
        let all: Vec<_> = Direction::ORTHOGONAL
            .into_iter()
            .chain(Direction::DIAGONAL)
            .map(Direction::offset)
            .collect();
        assert_eq!(
            all,
            vec![
                (0, -1),
                (1, 0),
                (0, 1),
                (-1, 0),
                (1, -1),
                (1, 1),
                (-1, 1),
                (-1, -1)
            ]
        );
    }

    #[test]
    fn direction_components() {
        assert_eq!(
            Direction::SouthEast.components(),
            (Direction::South, Direction::East)
        );
        assert_eq!(
            Direction::West.components(),
            (Direction::West, Direction::West)
        );
        assert!(Direction::NorthWest.is_diagonal());
        assert!(!Direction::South.is_diagonal());
    }

    #[test]
    fn direction_between() {
        let p = Point::new(1, 1);
        assert_eq!(
            Direction::between(p, Point::new(2, 0)),
            Some(Direction::NorthEast)
        );
        assert_eq!(Direction::between(p, Point::new(1, 2)), Some(Direction::South));
        assert_eq!(Direction::between(p, Point::new(3, 1)), None);
        assert_eq!(Direction::between(p, p), None);
    }

    #[test]
    fn range_basics() {
        let r = Range::with_size(3, 2);
        assert_eq!((r.width(), r.height()), (3, 2));
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn range_iter_is_row_major() {
        let pts: Vec<_> = Range::with_size(3, 2).iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Point::new(0, 0));
        assert_eq!(pts[3], Point::new(0, 1));
        assert_eq!(pts[5], Point::new(2, 1));
    }

    #[test]
    fn empty_range() {
        let r = Range::with_size(0, 4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }
}
