//! The obstacle grid a search runs on.
//!
//! [`GridModel`] is a `width × height` rectangle anchored at the origin with
//! a bitset of blocked cells. Dimensions are bytes because that is the unit
//! of the kernel's wire format; a grid is at most 255 × 255.

use std::fmt;

use crate::geom::{Direction, Point, Range};

const WORD_BITS: usize = u64::BITS as usize;

/// An immutable-per-request grid with O(1) obstacle membership.
#[derive(Clone, PartialEq, Eq)]
pub struct GridModel {
    width: u8,
    height: u8,
    /// Row-major obstacle bits, one per cell.
    blocked: Vec<u64>,
    obstacle_count: usize,
}

impl GridModel {
    /// Create an obstacle-free grid.
    pub fn open(width: u8, height: u8) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        let cells = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            blocked: vec![0; cells.div_ceil(WORD_BITS)],
            obstacle_count: 0,
        })
    }

    /// Create a grid with the given obstacles.
    ///
    /// Repeated obstacles are stored once. Any obstacle outside the grid is
    /// rejected so that a malformed request can never reach past the bitset.
    pub fn new(
        width: u8,
        height: u8,
        obstacles: impl IntoIterator<Item = Point>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::open(width, height)?;
        for p in obstacles {
            grid.set_obstacle(p)?;
        }
        Ok(grid)
    }

    /// Mark `p` as blocked. Marking an already blocked cell is a no-op.
    pub fn set_obstacle(&mut self, p: Point) -> Result<(), GridError> {
        let Some(i) = self.idx(p) else {
            return Err(GridError::ObstacleOutOfBounds(p));
        };
        let (word, bit) = (i / WORD_BITS, i % WORD_BITS);
        if self.blocked[word] & (1 << bit) == 0 {
            self.blocked[word] |= 1 << bit;
            self.obstacle_count += 1;
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// The grid rectangle, `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.width as i32, self.height as i32)
    }

    /// Number of distinct blocked cells.
    #[inline]
    pub fn obstacle_count(&self) -> usize {
        self.obstacle_count
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width as i32 && p.y < self.height as i32
    }

    /// Whether `p` is blocked. Cells outside the grid are not obstacles;
    /// use [`is_passable`](Self::is_passable) to test both at once.
    #[inline]
    pub fn is_obstacle(&self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => self.blocked[i / WORD_BITS] & (1 << (i % WORD_BITS)) != 0,
            None => false,
        }
    }

    /// Whether a search may enter `p`.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.in_bounds(p) && !self.is_obstacle(p)
    }

    /// Whether a single move from `from` in direction `d` is legal.
    ///
    /// The target must be passable. A diagonal move is refused when both
    /// orthogonal cells it passes between are blocked; one blocked side is
    /// allowed.
    pub fn can_step(&self, from: Point, d: Direction) -> bool {
        let to = from.step(d);
        if !self.is_passable(to) {
            return false;
        }
        if d.is_diagonal() {
            let (a, b) = d.components();
            if self.is_obstacle(from.step(a)) && self.is_obstacle(from.step(b)) {
                return false;
            }
        }
        true
    }

    /// Append the legal neighbours of `p` to `buf`.
    ///
    /// Orthogonal neighbours come first (N, E, S, W), then diagonals
    /// (NE, SE, SW, NW) when `allow_diagonal` is set. The caller clears
    /// `buf`.
    pub fn neighbors(&self, p: Point, allow_diagonal: bool, buf: &mut Vec<Point>) {
        for d in Direction::ORTHOGONAL {
            if self.can_step(p, d) {
                buf.push(p.step(d));
            }
        }
        if allow_diagonal {
            for d in Direction::DIAGONAL {
                if self.can_step(p, d) {
                    buf.push(p.step(d));
                }
            }
        }
    }

    /// Blocked cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds().iter().filter(|&p| self.is_obstacle(p))
    }

    /// Parse an ASCII map: `#` is an obstacle, `.` is open. Rows are
    /// separated by newlines and must have equal width once surrounding
    /// whitespace is trimmed.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let rows: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if rows.len() > u8::MAX as usize || width > u8::MAX as usize {
            return Err(ParseError::TooLarge);
        }
        let mut grid = Self::open(width as u8, rows.len() as u8).map_err(ParseError::Grid)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(ParseError::Ragged { line: y });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    '#' => grid.set_obstacle(pos).map_err(ParseError::Grid)?,
                    '.' => {}
                    _ => return Err(ParseError::InvalidChar { ch, pos }),
                }
            }
        }
        Ok(grid)
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }
}

impl fmt::Debug for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridModel")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("obstacle_count", &self.obstacle_count)
            .finish()
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let ch = if self.is_obstacle(Point::new(x, y)) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    width: u8,
    height: u8,
    obstacles: Vec<Point>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for GridModel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = GridRepr {
            width: self.width,
            height: self.height,
            obstacles: self.obstacles().collect(),
        };
        serde::Serialize::serialize(&repr, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GridModel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = <GridRepr as serde::Deserialize>::deserialize(deserializer)?;
        GridModel::new(repr.width, repr.height, repr.obstacles).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors building a [`GridModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero.
    EmptyGrid,
    /// An obstacle lies outside the grid.
    ObstacleOutOfBounds(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid: width and height must be positive"),
            Self::ObstacleOutOfBounds(p) => write!(f, "grid: obstacle {p} is out of bounds"),
        }
    }
}

impl std::error::Error for GridError {}

/// Errors parsing an ASCII map with [`GridModel::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Row `line` has a different width than the first row.
    Ragged { line: usize },
    /// A character other than `#` or `.` was found.
    InvalidChar { ch: char, pos: Point },
    /// More than 255 rows or columns.
    TooLarge,
    Grid(GridError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ragged { line } => write!(f, "map: row {line} has inconsistent width"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "map: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::TooLarge => write!(f, "map: more than 255 rows or columns"),
            Self::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors_of(g: &GridModel, p: Point, diag: bool) -> Vec<Point> {
        let mut buf = Vec::new();
        g.neighbors(p, diag, &mut buf);
        buf
    }

    #[test]
    fn new_rejects_empty_grid() {
        assert_eq!(GridModel::open(0, 5), Err(GridError::EmptyGrid));
        assert_eq!(GridModel::new(5, 0, []), Err(GridError::EmptyGrid));
    }

    #[test]
    fn new_rejects_out_of_bounds_obstacle() {
        let err = GridModel::new(3, 3, [Point::new(1, 1), Point::new(3, 0)]).unwrap_err();
        assert_eq!(err, GridError::ObstacleOutOfBounds(Point::new(3, 0)));
        let err = GridModel::new(3, 3, [Point::new(0, -1)]).unwrap_err();
        assert_eq!(err, GridError::ObstacleOutOfBounds(Point::new(0, -1)));
    }

    #[test]
    fn duplicate_obstacles_are_idempotent() {
        let p = Point::new(2, 1);
        let g = GridModel::new(4, 4, [p, p, p]).unwrap();
        assert_eq!(g.obstacle_count(), 1);
        assert!(g.is_obstacle(p));
        assert_eq!(g.obstacles().collect::<Vec<_>>(), vec![p]);
    }

    #[test]
    fn membership_spans_word_boundaries() {
        // 255 × 255 cells span many u64 words; the last cell is bit 65024.
        let last = Point::new(254, 254);
        let g = GridModel::new(255, 255, [Point::new(63, 0), Point::new(64, 0), last]).unwrap();
        assert!(g.is_obstacle(Point::new(63, 0)));
        assert!(g.is_obstacle(Point::new(64, 0)));
        assert!(!g.is_obstacle(Point::new(65, 0)));
        assert!(g.is_obstacle(last));
        assert_eq!(g.obstacle_count(), 3);
    }

    #[test]
    fn bounds_checks() {
        let g = GridModel::open(3, 2).unwrap();
        assert!(g.in_bounds(Point::new(2, 1)));
        assert!(!g.in_bounds(Point::new(3, 1)));
        assert!(!g.in_bounds(Point::new(0, 2)));
        assert!(!g.in_bounds(Point::new(-1, 0)));
        assert!(!g.is_obstacle(Point::new(-1, 0)));
        assert!(!g.is_passable(Point::new(-1, 0)));
        assert_eq!(g.bounds(), Range::with_size(3, 2));
    }

    #[test]
    fn orthogonal_neighbors_in_fixed_order() {
        let g = GridModel::open(3, 3).unwrap();
        let c = Point::new(1, 1);
        assert_eq!(
            neighbors_of(&g, c, false),
            vec![
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn diagonal_neighbors_follow_orthogonals() {
        let g = GridModel::open(3, 3).unwrap();
        let n = neighbors_of(&g, Point::new(1, 1), true);
        assert_eq!(n.len(), 8);
        assert_eq!(
            &n[4..],
            &[
                Point::new(2, 0),
                Point::new(2, 2),
                Point::new(0, 2),
                Point::new(0, 0)
            ]
        );
    }

    #[test]
    fn neighbors_filter_edges_and_obstacles() {
        let g = GridModel::new(3, 3, [Point::new(1, 0)]).unwrap();
        assert_eq!(
            neighbors_of(&g, Point::new(0, 0), true),
            vec![Point::new(0, 1), Point::new(1, 1)]
        );
    }

    #[test]
    fn corner_cut_refused_when_both_sides_blocked() {
        let g = GridModel::parse(
            "
            .#
            #.
            ",
        )
        .unwrap();
        assert!(!g.can_step(Point::new(0, 0), Direction::SouthEast));
        assert!(!g.can_step(Point::new(1, 1), Direction::NorthWest));
        assert!(neighbors_of(&g, Point::new(0, 0), true).is_empty());
    }

    #[test]
    fn corner_cut_allowed_when_one_side_blocked() {
        let g = GridModel::parse(
            "
            .#
            ..
            ",
        )
        .unwrap();
        assert!(g.can_step(Point::new(0, 0), Direction::SouthEast));
        assert_eq!(
            neighbors_of(&g, Point::new(0, 0), true),
            vec![Point::new(0, 1), Point::new(1, 1)]
        );
    }

    #[test]
    fn parse_and_display_round_trip() {
        let map = "..#\n#..\n";
        let g = GridModel::parse(map).unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        assert_eq!(g.obstacle_count(), 2);
        assert_eq!(g.to_string(), map);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            GridModel::parse("..\n...").unwrap_err(),
            ParseError::Ragged { line: 1 }
        );
        assert_eq!(
            GridModel::parse(".x").unwrap_err(),
            ParseError::InvalidChar {
                ch: 'x',
                pos: Point::new(1, 0)
            }
        );
        assert_eq!(
            GridModel::parse("").unwrap_err(),
            ParseError::Grid(GridError::EmptyGrid)
        );
    }
}
