use crate::{hex::CubeCoord, TileLayout};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines a grid. Two grids built from the same config
/// will always be identical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// Distance from the center of the grid to the edge (in tiles).
    #[validate(range(min = 0, max = 1000))]
    pub radius: u16,

    /// How tiles are placed in world space
    #[validate]
    pub layout: TileLayout,

    /// Settings for path queries run against this grid
    #[validate]
    pub pathfinding: PathConfig,

    /// Per-tile overrides, applied on top of the default tile properties
    /// after the grid is built. Every position must fall inside the grid.
    pub tiles: Vec<TileConfig>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: 3,
            layout: TileLayout::default(),
            pathfinding: PathConfig::default(),
            tiles: Vec::new(),
        }
    }
}

/// Configuration for path queries.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PathConfig {
    /// Multiplier for the heuristic (hex distance). 1.0 gives optimal paths
    /// on grids where every tile costs at least 1. Larger values trade path
    /// quality for speed, 0.0 disables the heuristic entirely.
    #[validate(range(min = 0.0))]
    pub heuristic_scale: f64,

    /// If the goal can't be reached, return a path to the reachable tile
    /// closest to it instead of failing.
    pub wants_partial_solution: bool,

    /// A search gives up after expanding this many times the number of tiles
    /// in the grid.
    #[validate(range(min = 1))]
    pub expansion_limit_factor: usize,

    /// Added to the vertical axis of every waypoint in a world-space path.
    pub path_point_z_offset: f64,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            heuristic_scale: 1.0,
            wants_partial_solution: false,
            expansion_limit_factor: 8,
            path_point_z_offset: 0.0,
        }
    }
}

/// An override for the properties of a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
    pub position: CubeCoord,
    #[serde(default = "default_tile_cost")]
    pub cost: f64,
    #[serde(default)]
    pub blocking: bool,
}

fn default_tile_cost() -> f64 {
    crate::Tile::DEFAULT_COST
}
