//! Error taxonomy and the status codes that cross the host boundary.
//!
//! [`KernelError`] is what the in-process API returns. [`KernelStatus`] is
//! its ABI-stable projection: the exported `search` returns a non-negative
//! byte count on success and a negative status otherwise, so "no path"
//! (zero bytes) is always distinguishable from a rejected request.

use std::fmt;

use gridwalk_core::{GridError, Point};

/// Why a request was rejected before any search ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Fewer than the seven header bytes.
    TooShort { len: usize },
    /// The obstacle section does not split into `(x, y)` pairs.
    OddObstacleBytes { len: usize },
    /// The diagonal flag was neither 0 nor 1.
    InvalidDiagonalFlag(u8),
    /// Width or height is zero.
    EmptyGrid,
    StartOutOfBounds(Point),
    EndOutOfBounds(Point),
    ObstacleOutOfBounds(Point),
    /// A path cell has a coordinate outside 0–255.
    Unencodable(Point),
    /// Path bytes do not split into `(x, y)` pairs.
    OddPathBytes { len: usize },
    /// The request does not start at the input region.
    ForeignAddress,
    /// The request is longer than the input region.
    InputTooLarge { len: usize, capacity: usize },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => write!(f, "{len} bytes is shorter than the 7-byte header"),
            Self::OddObstacleBytes { len } => {
                write!(f, "length {len} leaves a dangling obstacle coordinate")
            }
            Self::InvalidDiagonalFlag(b) => write!(f, "diagonal flag must be 0 or 1, got {b}"),
            Self::EmptyGrid => write!(f, "width and height must be positive"),
            Self::StartOutOfBounds(p) => write!(f, "start {p} is outside the grid"),
            Self::EndOutOfBounds(p) => write!(f, "end {p} is outside the grid"),
            Self::ObstacleOutOfBounds(p) => write!(f, "obstacle {p} is outside the grid"),
            Self::Unencodable(p) => write!(f, "cell {p} does not fit in one byte per axis"),
            Self::OddPathBytes { len } => write!(f, "path of {len} bytes is not a list of pairs"),
            Self::ForeignAddress => write!(f, "request does not start at the input buffer"),
            Self::InputTooLarge { len, capacity } => {
                write!(f, "request of {len} bytes exceeds input capacity {capacity}")
            }
        }
    }
}

/// Errors returned by the kernel.
///
/// An unreachable end cell is not an error; it is an empty path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// The request bytes do not describe a valid search.
    Malformed(MalformedReason),
    /// The encoded path would not fit the output region. Nothing was
    /// written.
    CapacityExceeded { needed: usize, capacity: usize },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(reason) => write!(f, "malformed request: {reason}"),
            Self::CapacityExceeded { needed, capacity } => write!(
                f,
                "encoded path needs {needed} bytes but the output buffer holds {capacity}"
            ),
        }
    }
}

impl std::error::Error for KernelError {}

impl From<MalformedReason> for KernelError {
    fn from(reason: MalformedReason) -> Self {
        Self::Malformed(reason)
    }
}

impl From<GridError> for KernelError {
    fn from(e: GridError) -> Self {
        match e {
            GridError::EmptyGrid => MalformedReason::EmptyGrid.into(),
            GridError::ObstacleOutOfBounds(p) => MalformedReason::ObstacleOutOfBounds(p).into(),
        }
    }
}

/// Status code returned across the host boundary.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelStatus {
    Ok = 0,
    /// The request was rejected without searching.
    MalformedRequest = -1,
    /// The path did not fit the output region.
    CapacityExceeded = -2,
    /// A Rust panic was caught at the export boundary.
    Panicked = -128,
}

impl KernelStatus {
    /// The raw value returned to the host.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Interpret a raw return value from `search`. Non-negative values are
    /// byte counts and map to `Ok`; unknown negative values map to `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            c if c >= 0 => Some(Self::Ok),
            -1 => Some(Self::MalformedRequest),
            -2 => Some(Self::CapacityExceeded),
            -128 => Some(Self::Panicked),
            _ => None,
        }
    }
}

impl From<&KernelError> for KernelStatus {
    fn from(e: &KernelError) -> Self {
        match e {
            KernelError::Malformed(_) => KernelStatus::MalformedRequest,
            KernelError::CapacityExceeded { .. } => KernelStatus::CapacityExceeded,
        }
    }
}
