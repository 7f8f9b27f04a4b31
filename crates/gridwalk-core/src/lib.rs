//! **gridwalk-core**: geometry and the obstacle grid for gridwalk.
//!
//! This crate provides the types shared by the search engine and the
//! buffer kernel: [`Point`] and [`Range`] geometry, the eight movement
//! [`Direction`]s in their fixed enumeration order, and [`GridModel`], a
//! bounded grid with bitset obstacle membership and corner-cutting-aware
//! neighbour enumeration.

pub mod geom;
pub mod grid_model;

pub use geom::{Direction, Point, Range};
pub use grid_model::{GridError, GridModel, ParseError};
