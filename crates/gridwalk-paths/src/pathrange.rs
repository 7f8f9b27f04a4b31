use std::collections::VecDeque;

use gridwalk_core::{GridModel, Point, Range};

/// Parent link of a search root.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Central coordinator for searches on a grid rectangle.
///
/// `PathRange` owns the visited markers, parent links and frontier queue,
/// so repeated queries incur no allocations once the caches
/// have grown to the largest grid seen. Visited markers are generation
/// stamps: starting a search bumps the generation instead of clearing the
/// array.
///
/// A `PathRange` serves one search at a time; `&mut self` on every query
/// makes that a compile-time guarantee.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    // path search caches
    pub(crate) visited: Vec<u32>,
    pub(crate) parent: Vec<usize>,
    pub(crate) generation: u32,
    pub(crate) queue: VecDeque<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a `PathRange` with no caches, covering an empty range.
    ///
    /// Usable in `static` initializers; call [`set_range`](Self::set_range)
    /// before searching.
    pub const fn empty() -> Self {
        Self {
            rng: Range::with_size(0, 0),
            width: 0,
            visited: Vec::new(),
            parent: Vec::new(),
            generation: 0,
            queue: VecDeque::new(),
            nbuf: Vec::new(),
        }
    }

    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let mut pr = Self::empty();
        pr.nbuf.reserve(8);
        pr.set_range(rng);
        pr
    }

    /// Create a `PathRange` covering `grid`.
    pub fn for_grid(grid: &GridModel) -> Self {
        Self::new(grid.bounds())
    }

    /// Replace the underlying range.
    ///
    /// Caches only grow: a range that fits within the current capacity
    /// reuses them as they are, since stale visited stamps belong to an
    /// older generation.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        self.width = rng.width().max(0) as usize;

        let new_len = rng.len();
        if new_len > self.visited.len() {
            self.visited.resize(new_len, 0);
            self.parent.resize(new_len, NO_PARENT);
        }
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Start a new search generation, returning its stamp.
    ///
    /// Stamps are never zero, so fresh cache entries always read as
    /// unvisited. On wrap-around the markers are cleared once.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.visited.fill(0);
            self.generation = 1;
        }
        self.generation
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

impl Default for PathRange {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.rng, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let range = <Range as serde::Deserialize>::deserialize(deserializer)?;
        Ok(PathRange::new(range))
    }
}
