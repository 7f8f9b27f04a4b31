//! Breadth-first shortest paths on bounded grids.
//!
//! All searches go through [`PathRange`], which owns and reuses the visited
//! markers, parent links and frontier queue so that repeated queries incur
//! zero allocations after warm-up:
//!
//! Shortest paths come from layered BFS ([`PathRange::bfs_path`]), with
//! deterministic tie-breaking between equally short paths.
//!
//! Neighbourhoods come from a [`Pather`]. [`GridPather`] adapts a
//! [`GridModel`](gridwalk_core::GridModel) under 4- or 8-connected
//! movement.
//!
//! ```
//! use gridwalk_core::{GridModel, Point};
//! use gridwalk_paths::{GridPather, PathRange};
//!
//! let grid = GridModel::parse("..\n#.").unwrap();
//! let mut paths = PathRange::for_grid(&grid);
//! let path = paths
//!     .bfs_path(&GridPather::orthogonal(&grid), Point::new(0, 0), Point::new(1, 1))
//!     .unwrap();
//! assert_eq!(path, [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]);
//! ```

mod bfs;
mod distance;
mod grid;
mod pathrange;
mod traits;

pub use distance::{chebyshev, manhattan};
pub use grid::GridPather;
pub use pathrange::PathRange;
pub use traits::Pather;
