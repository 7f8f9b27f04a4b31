use gridwalk_core::{GridModel, Point};

use crate::traits::Pather;

/// Adapts a [`GridModel`] to [`Pather`] under a movement rule.
///
/// Neighbours come from [`GridModel::neighbors`], so obstacles, bounds and
/// the corner-cutting rule all apply. Obstacle cells are not passable,
/// which makes a search with a blocked endpoint report no path.
#[derive(Clone, Copy, Debug)]
pub struct GridPather<'a> {
    grid: &'a GridModel,
    allow_diagonal: bool,
}

impl<'a> GridPather<'a> {
    /// 4-connected movement.
    pub fn orthogonal(grid: &'a GridModel) -> Self {
        Self::new(grid, false)
    }

    /// 8-connected movement.
    pub fn diagonal(grid: &'a GridModel) -> Self {
        Self::new(grid, true)
    }

    pub fn new(grid: &'a GridModel, allow_diagonal: bool) -> Self {
        Self {
            grid,
            allow_diagonal,
        }
    }
}

impl Pather for GridPather<'_> {
    #[inline]
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.grid.neighbors(p, self.allow_diagonal, buf);
    }

    #[inline]
    fn passable(&self, p: Point) -> bool {
        self.grid.is_passable(p)
    }
}
