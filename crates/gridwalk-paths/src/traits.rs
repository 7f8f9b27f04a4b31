use gridwalk_core::Point;

/// Minimal pathfinding interface: neighbour enumeration plus an endpoint
/// check.
pub trait Pather {
    /// Append the cells reachable in one step from `p` into `buf`, in a
    /// fixed order. The caller clears `buf` before calling.
    ///
    /// Search results are deterministic only if this order is.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Whether `p` may be used as a search endpoint. Defaults to `true`.
    fn passable(&self, _p: Point) -> bool {
        true
    }
}
