//! The byte layouts exchanged with the host.
//!
//! A request is a flat list of bytes:
//!
//! ```text
//! [allowDiagonal, width, height, startX, startY, endX, endY, (obstacleX, obstacleY)*]
//! ```
//!
//! `allowDiagonal` is 0 or 1, dimensions are 1–255, and every coordinate
//! must lie inside the grid. A path is the list of its cells as
//! `[x, y]` pairs, start first. Nothing is clamped: any byte outside its
//! domain rejects the whole request.

use gridwalk_core::{GridModel, Point};

use crate::error::{KernelError, MalformedReason};

/// Bytes before the obstacle list.
pub const HEADER_LEN: usize = 7;

/// A decoded, validated search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchRequest {
    grid: GridModel,
    start: Point,
    end: Point,
    allow_diagonal: bool,
}

impl SearchRequest {
    /// Bind a query to `grid`. Both endpoints must lie inside the grid;
    /// they may be obstacles, in which case the search finds no path.
    pub fn new(
        grid: GridModel,
        start: Point,
        end: Point,
        allow_diagonal: bool,
    ) -> Result<Self, KernelError> {
        if !grid.in_bounds(start) {
            return Err(MalformedReason::StartOutOfBounds(start).into());
        }
        if !grid.in_bounds(end) {
            return Err(MalformedReason::EndOutOfBounds(end).into());
        }
        Ok(Self {
            grid,
            start,
            end,
            allow_diagonal,
        })
    }

    /// Decode a request from its wire form.
    ///
    /// The shape is checked before anything is allocated, so an oversized
    /// or truncated buffer fails fast.
    pub fn decode(bytes: &[u8]) -> Result<Self, KernelError> {
        let Some((header, body)) = bytes.split_first_chunk::<HEADER_LEN>() else {
            return Err(MalformedReason::TooShort { len: bytes.len() }.into());
        };
        if body.len() % 2 != 0 {
            return Err(MalformedReason::OddObstacleBytes { len: bytes.len() }.into());
        }
        let [flag, width, height, sx, sy, ex, ey] = *header;
        let allow_diagonal = match flag {
            0 => false,
            1 => true,
            other => return Err(MalformedReason::InvalidDiagonalFlag(other).into()),
        };
        if width == 0 || height == 0 {
            return Err(MalformedReason::EmptyGrid.into());
        }

        let obstacles = body.chunks_exact(2).map(|c| Point::from((c[0], c[1])));
        let grid = GridModel::new(width, height, obstacles)?;
        Self::new(
            grid,
            Point::from((sx, sy)),
            Point::from((ex, ey)),
            allow_diagonal,
        )
    }

    /// Encode the request in wire form. Obstacles are written once each in
    /// row-major order.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + 2 * self.grid.obstacle_count());
        out.extend_from_slice(&[
            self.allow_diagonal as u8,
            self.grid.width(),
            self.grid.height(),
            self.start.x as u8,
            self.start.y as u8,
            self.end.x as u8,
            self.end.y as u8,
        ]);
        for p in self.grid.obstacles() {
            out.extend_from_slice(&[p.x as u8, p.y as u8]);
        }
        out
    }

    #[inline]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn allow_diagonal(&self) -> bool {
        self.allow_diagonal
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RequestRepr {
    grid: GridModel,
    start: Point,
    end: Point,
    allow_diagonal: bool,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SearchRequest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = <RequestRepr as serde::Deserialize>::deserialize(deserializer)?;
        SearchRequest::new(repr.grid, repr.start, repr.end, repr.allow_diagonal)
            .map_err(serde::de::Error::custom)
    }
}

/// Write `path` into `out` as `[x, y]` pairs and return the byte count.
///
/// The whole path is validated against the capacity of `out` before the
/// first byte is written, so a failed call leaves `out` untouched.
pub fn encode_path(path: &[Point], out: &mut [u8]) -> Result<usize, KernelError> {
    let needed = path.len() * 2;
    if needed > out.len() {
        return Err(KernelError::CapacityExceeded {
            needed,
            capacity: out.len(),
        });
    }
    let cells = path
        .iter()
        .map(|&p| encode_cell(p).ok_or(MalformedReason::Unencodable(p)))
        .collect::<Result<Vec<_>, _>>()?;
    for (pair, bytes) in out.chunks_exact_mut(2).zip(cells) {
        pair.copy_from_slice(&bytes);
    }
    Ok(needed)
}

/// Read a path back from `[x, y]` pairs.
pub fn decode_path(bytes: &[u8]) -> Result<Vec<Point>, KernelError> {
    if bytes.len() % 2 != 0 {
        return Err(MalformedReason::OddPathBytes { len: bytes.len() }.into());
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|c| Point::from((c[0], c[1])))
        .collect())
}

#[inline]
fn encode_cell(p: Point) -> Option<[u8; 2]> {
    Some([u8::try_from(p.x).ok()?, u8::try_from(p.y).ok()?])
}
