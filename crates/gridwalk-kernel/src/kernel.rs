//! The in-process search API that the exported entry points sit on.

use gridwalk_core::{GridModel, Point};
use gridwalk_paths::{GridPather, PathRange};

use crate::config::KernelConfig;
use crate::error::{KernelError, MalformedReason};
use crate::protocol::{SearchRequest, encode_path};

/// A shortest-path kernel: request bytes in, path bytes out.
///
/// The kernel keeps one [`PathRange`] across calls, so after the first
/// search on the largest grid it will see, searches allocate only the
/// returned path. `&mut self` gives the one-call-at-a-time guarantee that
/// the exported entry points can only document.
pub struct Kernel {
    config: KernelConfig,
    paths: PathRange,
}

impl Kernel {
    /// A kernel with [`KernelConfig::DEFAULT`] limits. Usable in `static`
    /// initializers.
    pub const fn new() -> Self {
        Self::with_config(KernelConfig::DEFAULT)
    }

    pub const fn with_config(config: KernelConfig) -> Self {
        Self {
            config,
            paths: PathRange::empty(),
        }
    }

    #[inline]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Decode `input`, search, and encode the path into `output`.
    ///
    /// Returns the number of bytes written; zero means there is no path.
    /// Output is bounded by the smaller of `output.len()` and the
    /// configured capacity, and nothing is written unless the whole path
    /// fits.
    pub fn search(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, KernelError> {
        let result = self.decode_and_search(input, output);
        if let Err(e) = &result {
            log::warn!("search: rejected: {e}");
        }
        result
    }

    fn decode_and_search(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<usize, KernelError> {
        if input.len() > self.config.input_capacity {
            return Err(MalformedReason::InputTooLarge {
                len: input.len(),
                capacity: self.config.input_capacity,
            }
            .into());
        }
        let request = SearchRequest::decode(input)?;
        log::debug!(
            "search: {}x{} grid, {} obstacles, {} -> {}, diagonal={}",
            request.grid().width(),
            request.grid().height(),
            request.grid().obstacle_count(),
            request.start(),
            request.end(),
            request.allow_diagonal()
        );

        let Some(path) = self.find_path(&request) else {
            return Ok(0);
        };
        let capacity = output.len().min(self.config.output_capacity);
        encode_path(&path, &mut output[..capacity])
    }

    /// Run the search described by `request`.
    ///
    /// Returns `None` when the end cannot be reached, including when either
    /// endpoint is an obstacle.
    pub fn find_path(&mut self, request: &SearchRequest) -> Option<Vec<Point>> {
        let grid = request.grid();
        self.paths.set_range(grid.bounds());
        let pather = GridPather::new(grid, request.allow_diagonal());
        self.paths.bfs_path(&pather, request.start(), request.end())
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest path from `start` to `end` on a `width × height` grid.
///
/// This is the logical operation behind the byte protocol, for callers that
/// already hold structured values. Returns an empty path when `end` is
/// unreachable and a malformed-request error when the grid is empty or any
/// cell lies outside it.
pub fn shortest_path(
    width: u8,
    height: u8,
    start: (u8, u8),
    end: (u8, u8),
    obstacles: &[(u8, u8)],
    allow_diagonal: bool,
) -> Result<Vec<Point>, KernelError> {
    let grid = GridModel::new(width, height, obstacles.iter().map(|&c| Point::from(c)))?;
    let request = SearchRequest::new(grid, start.into(), end.into(), allow_diagonal)?;
    Ok(Kernel::new().find_path(&request).unwrap_or_default())
}
