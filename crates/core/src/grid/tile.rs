use crate::hex::{to_world, CubeCoord, Point3, TileLayout};
use anyhow::bail;
use serde::{Deserialize, Serialize};

/// A single tile in a [HexGrid](crate::HexGrid). Tiles are only made by grid
/// generation, so every tile's world position always matches its coordinate
/// under the grid's layout. Only the pathfinding properties (cost and
/// blocking) can change after that.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// The location of this tile in the grid. Every tile in a grid has a
    /// unique position.
    position: CubeCoord,

    /// Center of the tile in world space, computed once from the layout
    world_position: Point3,

    /// Cost to step _onto_ this tile. Always positive.
    cost: f64,

    /// Blocking tiles can never be stepped onto
    blocking: bool,
}

impl Tile {
    pub const DEFAULT_COST: f64 = 1.0;

    pub(super) fn new(layout: &TileLayout, position: CubeCoord) -> Self {
        Self {
            position,
            world_position: to_world(layout, position),
            cost: Self::DEFAULT_COST,
            blocking: false,
        }
    }

    pub fn position(&self) -> CubeCoord {
        self.position
    }

    pub fn world_position(&self) -> Point3 {
        self.world_position
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Set the cost to step onto this tile. Fails if the cost isn't a
    /// positive finite number, since the search relies on every step costing
    /// something.
    pub fn set_cost(&mut self, cost: f64) -> anyhow::Result<()> {
        if !(cost.is_finite() && cost > 0.0) {
            bail!(
                "invalid cost {} for tile {}; must be positive",
                cost,
                self.position
            );
        }
        self.cost = cost;
        Ok(())
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    pub fn set_blocking(&mut self, blocking: bool) {
        self.blocking = blocking;
    }

    pub(super) fn to_record(&self) -> TileRecord {
        TileRecord {
            position: self.position,
            cost: self.cost,
            blocking: self.blocking,
        }
    }
}

/// The persisted form of a tile. World position is left out, it gets
/// recomputed from the layout on load.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(super) struct TileRecord {
    pub position: CubeCoord,
    pub cost: f64,
    pub blocking: bool,
}
