//! Hexnav is a hex tile-based navigation library. This crate contains the
//! hex grid math (coordinates, layouts, and common tile shapes), a grid of
//! tiles with pathfinding properties, and a generic A* search that routes
//! across it. Hosts (game engines, tools, the `hexnav` CLI) live elsewhere.
//!
//! ```
//! use hexnav::{hex::CubeCoord, GridConfig, HexGrid, SearchStatus};
//!
//! let config = GridConfig::default();
//! let grid = HexGrid::generate(&config).unwrap();
//! let result = grid.find_tile_path(
//!     CubeCoord::ORIGIN,
//!     CubeCoord::new_qr(2, -1),
//!     &config.pathfinding,
//!     None,
//! );
//! assert_eq!(result.status, SearchStatus::Success);
//! assert_eq!(result.path.len(), 2);
//! ```
//!
//! See [GridConfig] for details on how grids can be customized, and the
//! [path] module for searching graphs other than hex grids.

mod config;
mod grid;
pub mod hex;
pub mod path;
mod util;

pub use crate::{
    config::{GridConfig, PathConfig, TileConfig},
    grid::{GridPathFilter, HexGrid, NavPath, ObstacleFn, Tile},
    hex::{CubeCoord, Orientation, Point3, TileLayout},
    path::{find_path, path_exists, PathResult, SearchStatus},
    util::grid_len,
};
