//! A shortest-path compute kernel behind a flat byte-buffer boundary.
//!
//! The host writes a request into a fixed input region, calls the exported
//! `search`, and reads the path back from a fixed output region. See
//! [`exports`] for that surface and [`protocol`] for the byte layouts.
//!
//! The exports are a thin layer over a safe in-process API that can be
//! used directly:
//!
//! ```
//! use gridwalk_kernel::{Kernel, decode_path};
//!
//! let mut kernel = Kernel::new();
//! let mut out = [0u8; 64];
//! // 5×5 grid, diagonals allowed, (0,0) -> (4,4), no obstacles.
//! let n = kernel.search(&[1, 5, 5, 0, 0, 4, 4], &mut out).unwrap();
//! assert_eq!(decode_path(&out[..n]).unwrap().len(), 5);
//! ```
//!
//! # Errors
//!
//! Rejected requests never reach the search and never write output. Across
//! the host boundary they become negative [`KernelStatus`] codes; an
//! unreachable end is a successful zero-length result.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod exports;
pub mod kernel;
pub mod protocol;

pub use config::{INPUT_CAPACITY, KernelConfig, OUTPUT_CAPACITY};
pub use error::{KernelError, KernelStatus, MalformedReason};
pub use kernel::{Kernel, shortest_path};
pub use protocol::{HEADER_LEN, SearchRequest, decode_path, encode_path};
