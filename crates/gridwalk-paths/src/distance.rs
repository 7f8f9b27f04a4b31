use gridwalk_core::Point;

/// Manhattan (L1) distance: the step count of an unobstructed
/// 4-connected path.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance: the step count of an unobstructed
/// 8-connected path.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}
