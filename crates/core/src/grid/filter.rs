use crate::{
    grid::{HexGrid, Tile},
    path::QueryFilter,
    PathConfig,
};
use std::fmt::{self, Debug};

/// Host-supplied obstacle check. Returns `true` if the tile can't be entered.
pub type ObstacleFn<'a> = &'a dyn Fn(&Tile) -> bool;

/// The default rules for searching a [HexGrid]:
/// - Stepping onto a tile costs that tile's [Tile::cost]
/// - Blocking tiles, and tiles the optional obstacle check rejects, can't be
///   entered
/// - The heuristic is hex distance, scaled by
///   [PathConfig::heuristic_scale]
#[derive(Copy, Clone)]
pub struct GridPathFilter<'a> {
    grid: &'a HexGrid,
    heuristic_scale: f64,
    wants_partial_solution: bool,
    is_obstacle: Option<ObstacleFn<'a>>,
}

impl<'a> GridPathFilter<'a> {
    pub fn new(grid: &'a HexGrid, config: &PathConfig) -> Self {
        Self {
            grid,
            heuristic_scale: config.heuristic_scale,
            wants_partial_solution: config.wants_partial_solution,
            is_obstacle: None,
        }
    }

    /// Add an extra obstacle check, on top of each tile's blocking flag.
    pub fn with_obstacles(mut self, is_obstacle: ObstacleFn<'a>) -> Self {
        self.is_obstacle = Some(is_obstacle);
        self
    }
}

impl QueryFilter<HexGrid> for GridPathFilter<'_> {
    fn heuristic_scale(&self) -> f64 {
        self.heuristic_scale
    }

    fn heuristic_cost(&self, from: usize, to: usize) -> f64 {
        match (self.grid.get(from), self.grid.get(to)) {
            (Some(from), Some(to)) => {
                f64::from(from.position().distance_to(to.position()))
            }
            _ => 0.0,
        }
    }

    fn traversal_cost(&self, _from: usize, to: usize) -> f64 {
        self.grid.get(to).map_or(f64::INFINITY, Tile::cost)
    }

    fn is_traversal_allowed(&self, _from: usize, to: usize) -> bool {
        match self.grid.get(to) {
            Some(tile) => {
                !tile.is_blocking()
                    && !self.is_obstacle.map_or(false, |is_obstacle| is_obstacle(tile))
            }
            None => false,
        }
    }

    fn wants_partial_solution(&self) -> bool {
        self.wants_partial_solution
    }
}

impl Debug for GridPathFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridPathFilter")
            .field("heuristic_scale", &self.heuristic_scale)
            .field("wants_partial_solution", &self.wants_partial_solution)
            .field("has_obstacle_fn", &self.is_obstacle.is_some())
            .finish()
    }
}
