//! This module holds the basic types and math for hexagon grids.
//!
//! ## Coordinate Systems
//!
//! Hexnav uses two different coordinate systems:
//!
//! ### Hex Coordinates
//!
//! Hex coordinates identify tiles. The system we use is the [cube coordinate
//! system defined by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube).
//!
//! Each coordinate has three components (`q`, `r`, and `s`). **For any tile
//! coordinate, all three components will be integers and `q + r + s = 0`.**
//! Even though hexagon tiles are mapped out in two dimensions, using three
//! components makes math around hexagonal grids much simpler: distance,
//! rotation, and neighbor offsets all turn into plain vector arithmetic. The
//! third component is redundant, which is why [AxialCoord] can drop it.
//!
//! Any continuous point in hex space (e.g. the result of converting an
//! arbitrary world position) is a [FractionalCoord]. Those only satisfy
//! `q + r + s = 0` approximately, and get snapped back onto a tile with
//! [hex_round].
//!
//! ### World Coordinates
//!
//! World coordinates are plain 3D positions ([Point3]), in whatever units the
//! host uses. A [TileLayout] defines how tiles sit in that space: their
//! orientation (flat-top or pointy-top), their size, and where the origin tile
//! is. The grid always lies on a horizontal plane, so converting from hex to
//! world space takes the vertical axis from the layout origin, and converting
//! back ignores it entirely.
//!
//! **Note:** tiles are assumed to be contiguous, meaning there are no gaps
//! between them. Two adjacent tiles share exactly one side and two vertices.

mod layout;
mod shape;
mod unit;

pub use layout::*;
pub use shape::*;
pub use unit::*;

use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::collections::HashSet;

// Aliases that use fnv for hashing, which is faster for small keys
pub type CubeCoordSet = HashSet<CubeCoord, FnvBuildHasher>;
pub type CubeCoordIndexMap<T> = IndexMap<CubeCoord, T, FnvBuildHasher>;
