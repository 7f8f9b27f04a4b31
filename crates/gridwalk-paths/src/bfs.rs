use gridwalk_core::Point;

use crate::PathRange;
use crate::pathrange::NO_PARENT;
use crate::traits::Pather;

impl PathRange {
    /// Compute a shortest path from `from` to `to` by breadth-first search.
    ///
    /// Every step costs one, diagonal or not. The frontier is strictly
    /// FIFO and neighbours are expanded in the order the pather yields them,
    /// so among several shortest paths the first one reached is always the
    /// one returned.
    ///
    /// Returns the full path (including both endpoints), or `None` if `to`
    /// is unreachable, either endpoint lies outside the range, or either
    /// endpoint is not [`passable`](Pather::passable).
    pub fn bfs_path<P: Pather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if !pather.passable(from) || !pather.passable(to) {
            return None;
        }
        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        let cur_gen = self.next_generation();
        self.queue.clear();
        self.visited[start_idx] = cur_gen;
        self.parent[start_idx] = NO_PARENT;
        self.queue.push_back(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(ci) = self.queue.pop_front() else {
                break 'search false;
            };
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.visited[ni] == cur_gen {
                    continue;
                }
                self.visited[ni] = cur_gen;
                self.parent[ni] = ci;
                if ni == goal_idx {
                    break 'search true;
                }
                self.queue.push_back(ni);
            }
        };

        self.nbuf = nbuf;

        if !found {
            log::trace!("bfs: frontier exhausted, no path from {from} to {to}");
            return None;
        }

        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.parent[ci];
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use gridwalk_core::{Direction, GridModel};

    use super::*;
    use crate::{GridPather, chebyshev, manhattan};

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn path(grid: &GridModel, diag: bool, from: (i32, i32), to: (i32, i32)) -> Option<Vec<Point>> {
        let mut pr = PathRange::for_grid(grid);
        pr.bfs_path(
            &GridPather::new(grid, diag),
            Point::new(from.0, from.1),
            Point::new(to.0, to.1),
        )
    }

    #[test]
    fn open_grid_orthogonal() {
        let g = GridModel::open(5, 5).unwrap();
        let p = path(&g, false, (0, 0), (4, 4)).unwrap();
        assert_eq!(p.len(), 9);
        assert_eq!(p.len() as i32 - 1, manhattan(p[0], p[8]));
        for w in p.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1);
            assert!(w[1].x >= w[0].x && w[1].y >= w[0].y);
        }
    }

    #[test]
    fn open_grid_orthogonal_tie_break_is_fixed() {
        // N, E, S, W order: east is expanded before south, so the first
        // cell to reach the bottom row is discovered along the top row.
        let g = GridModel::open(3, 3).unwrap();
        assert_eq!(
            path(&g, false, (0, 0), (2, 2)).unwrap(),
            pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])
        );
    }

    #[test]
    fn open_grid_diagonal() {
        let g = GridModel::open(5, 5).unwrap();
        let p = path(&g, true, (0, 0), (4, 4)).unwrap();
        assert_eq!(p, pts(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]));
        assert_eq!(p.len() as i32 - 1, chebyshev(p[0], p[4]));
    }

    #[test]
    fn wall_forces_detour() {
        let g = GridModel::parse(
            "
            .#.
            .#.
            ...
            ",
        )
        .unwrap();
        assert_eq!(
            path(&g, false, (0, 0), (2, 0)).unwrap(),
            pts(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)])
        );
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let g = GridModel::parse(
            "
            .....
            .###.
            .#.#.
            .###.
            .....
            ",
        )
        .unwrap();
        assert_eq!(path(&g, false, (0, 0), (2, 2)), None);
        assert_eq!(path(&g, true, (0, 0), (2, 2)), None);
    }

    #[test]
    fn diagonal_cannot_squeeze_through_corner() {
        let g = GridModel::parse(
            "
            .#.
            #..
            ...
            ",
        )
        .unwrap();
        // (0,0) is sealed off: its only diagonal exit cuts a blocked corner.
        assert_eq!(path(&g, true, (0, 0), (2, 2)), None);
    }

    #[test]
    fn diagonal_may_pass_one_blocked_side() {
        let g = GridModel::parse(
            "
            .#
            ..
            ",
        )
        .unwrap();
        let p = path(&g, true, (0, 0), (1, 1)).unwrap();
        assert_eq!(p, pts(&[(0, 0), (1, 1)]));
        assert_eq!(Direction::between(p[0], p[1]), Some(Direction::SouthEast));
    }

    #[test]
    fn start_equals_end() {
        let g = GridModel::open(4, 4).unwrap();
        assert_eq!(path(&g, false, (2, 3), (2, 3)).unwrap(), pts(&[(2, 3)]));
    }

    #[test]
    fn blocked_endpoints_have_no_path() {
        let g = GridModel::new(4, 1, [Point::new(0, 0), Point::new(3, 0)]).unwrap();
        assert_eq!(path(&g, false, (0, 0), (2, 0)), None);
        assert_eq!(path(&g, false, (1, 0), (3, 0)), None);
        assert_eq!(path(&g, false, (0, 0), (0, 0)), None);
        assert!(path(&g, false, (1, 0), (2, 0)).is_some());
    }

    #[test]
    fn out_of_range_endpoints_have_no_path() {
        let g = GridModel::open(3, 3).unwrap();
        assert_eq!(path(&g, false, (0, 0), (3, 0)), None);
        assert_eq!(path(&g, false, (-1, 0), (1, 1)), None);
    }

    #[test]
    fn repeated_searches_reuse_caches() {
        let open = GridModel::open(6, 6).unwrap();
        let walled = GridModel::parse(
            "
            ..#...
            ..#...
            ..#...
            ..#...
            ..#...
            ..#...
            ",
        )
        .unwrap();
        let mut pr = PathRange::for_grid(&open);
        let from = Point::new(0, 0);
        let to = Point::new(5, 0);
        assert!(pr.bfs_path(&GridPather::orthogonal(&walled), from, to).is_none());
        let p = pr.bfs_path(&GridPather::orthogonal(&open), from, to).unwrap();
        assert_eq!(p.len(), 6);
        // A smaller grid reuses the same caches.
        let small = GridModel::open(2, 2).unwrap();
        pr.set_range(small.bounds());
        let p = pr
            .bfs_path(&GridPather::diagonal(&small), from, Point::new(1, 1))
            .unwrap();
        assert_eq!(p.len(), 2);
    }
}
