mod filter;
mod nav;
mod tile;

pub use filter::{GridPathFilter, ObstacleFn};
pub use nav::NavPath;
pub use tile::Tile;

use crate::{
    hex::{
        hexagonal_region, to_hex, CubeCoord, CubeCoordIndexMap, CubeCoordSet,
        Point3,
    },
    path::{AStar, Graph, PathResult, SearchStatus},
    timed,
    util::grid_len,
    GridConfig, PathConfig, TileLayout,
};
use anyhow::{anyhow, Context};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tile::TileRecord;
use validator::Validate;

/// Positions closer than this (on every axis) count as the same place
const NEARLY_EQUAL_TOLERANCE: f64 = 1e-4;

/// A hexagonal region of tiles, laid out in world space. The grid is made in
/// a single generation pass and is never resized afterwards; tile costs and
/// blocking flags can be changed in place.
///
/// Tiles are kept in generation order (see
/// [hexagonal_region](crate::hex::hexagonal_region)), and that order is how
/// tiles are identified during a search: the grid implements [Graph] with
/// each tile's index as its node reference.
///
/// ## Serialization
///
/// A grid serializes as its layout, radius, and the list of tiles (position,
/// cost and blocking flag). World positions aren't stored; they're recomputed
/// from the layout on load. Deserialization re-checks everything, so a tile
/// list that doesn't match the radius, or a tile with a bad cost, is an
/// error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SerializedGrid", into = "SerializedGrid")]
pub struct HexGrid {
    layout: TileLayout,
    radius: u16,
    tiles: CubeCoordIndexMap<Tile>,
}

impl HexGrid {
    /// Build a grid of default tiles with the given radius. Fails if the
    /// layout is invalid.
    pub fn build(layout: TileLayout, radius: u16) -> anyhow::Result<Self> {
        Self::build_with(layout, radius, |_, _| {})
    }

    /// Build a grid of default tiles, calling `on_step` for each coordinate
    /// as its tile is made. Coordinates are visited in generation order.
    pub fn build_with<F>(
        layout: TileLayout,
        radius: u16,
        mut on_step: F,
    ) -> anyhow::Result<Self>
    where
        F: FnMut(&TileLayout, CubeCoord),
    {
        layout.validate().context("invalid tile layout")?;

        let tiles = timed!("Grid generation", log::Level::Info, {
            let mut tiles = CubeCoordIndexMap::default();
            tiles.reserve(grid_len(radius));
            for position in hexagonal_region(radius) {
                on_step(&layout, position);
                tiles.insert(position, Tile::new(&layout, position));
            }
            tiles
        });

        Ok(Self {
            layout,
            radius,
            tiles,
        })
    }

    /// Generate a grid from a config, then apply its tile overrides. Returns
    /// an error if the config is invalid, or if an override is outside the
    /// grid or has a bad cost.
    pub fn generate(config: &GridConfig) -> anyhow::Result<Self> {
        info!("Generating grid with config {:#?}", config);

        config.validate().context("invalid config")?;
        let mut grid = Self::build(config.layout, config.radius)?;

        for tile_config in &config.tiles {
            let tile = grid.get_mut(tile_config.position).ok_or_else(|| {
                anyhow!(
                    "tile override at {} is outside grid of radius {}",
                    tile_config.position,
                    config.radius
                )
            })?;
            tile.set_cost(tile_config.cost)
                .context("invalid tile override")?;
            tile.set_blocking(tile_config.blocking);
        }
        debug!("Applied {} tile overrides", config.tiles.len());

        Ok(grid)
    }

    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    pub fn radius(&self) -> u16 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Get the tile at a coordinate, or `None` if it's outside the grid.
    pub fn find_at(&self, position: CubeCoord) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    /// Get the index of the tile at a coordinate. This is the node reference
    /// used when searching the grid.
    pub fn index_of(&self, position: CubeCoord) -> Option<usize> {
        self.tiles.get_index_of(&position)
    }

    /// Get a tile by its index.
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get_index(index).map(|(_, tile)| tile)
    }

    /// Get a mutable reference to the tile at a coordinate. Only cost and
    /// blocking can be changed through it.
    pub fn get_mut(&mut self, position: CubeCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&position)
    }

    /// Set the cost of the tile at a coordinate. Fails if the coordinate is
    /// outside the grid or the cost isn't positive.
    pub fn set_cost(
        &mut self,
        position: CubeCoord,
        cost: f64,
    ) -> anyhow::Result<()> {
        self.tile_mut(position)?.set_cost(cost)
    }

    /// Mark the tile at a coordinate as blocking (or not). Fails if the
    /// coordinate is outside the grid.
    pub fn set_blocking(
        &mut self,
        position: CubeCoord,
        blocking: bool,
    ) -> anyhow::Result<()> {
        self.tile_mut(position)?.set_blocking(blocking);
        Ok(())
    }

    /// Iterate over every tile, in generation order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Iterate over every coordinate in the grid, in generation order.
    pub fn coordinates(&self) -> impl Iterator<Item = CubeCoord> + '_ {
        self.tiles.keys().copied()
    }

    /// Find the cheapest path between two tiles, using the grid's default
    /// rules (see [GridPathFilter]). The returned path is a list of
    /// coordinates, excluding `start`.
    pub fn find_tile_path(
        &self,
        start: CubeCoord,
        end: CubeCoord,
        config: &PathConfig,
        is_obstacle: Option<ObstacleFn<'_>>,
    ) -> PathResult<CubeCoord> {
        let (start, end) = match (self.index_of(start), self.index_of(end)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                debug!("Tile path endpoint off grid: {} -> {}", start, end);
                return PathResult {
                    status: SearchStatus::Fail,
                    path: Vec::new(),
                    cost: 0.0,
                    nodes_expanded: 0,
                };
            }
        };

        let result = self.search(start, end, config, is_obstacle);
        PathResult {
            status: result.status,
            path: result
                .path
                .into_iter()
                .filter_map(|index| self.get(index).map(Tile::position))
                .collect(),
            cost: result.cost,
            nodes_expanded: result.nodes_expanded,
        }
    }

    /// Find a path between two world positions. Each position is mapped onto
    /// the tile that contains it, then the tiles are searched with the grid's
    /// default rules. The resulting path starts at `start` itself, then
    /// visits the center of each tile along the way, raised by
    /// [PathConfig::path_point_z_offset].
    ///
    /// If `start` and `end` are essentially the same spot, the path is just
    /// that one point. If either one is outside the grid, or isn't a finite
    /// position, the search fails.
    pub fn find_path_world(
        &self,
        start: Point3,
        end: Point3,
        config: &PathConfig,
        is_obstacle: Option<ObstacleFn<'_>>,
    ) -> NavPath {
        if !start.is_finite() || !end.is_finite() {
            debug!("World path endpoint not finite: {} -> {}", start, end);
            return NavPath::failed(SearchStatus::Fail);
        }
        if start.nearly_equals(end, NEARLY_EQUAL_TOLERANCE) {
            return NavPath {
                status: SearchStatus::Success,
                points: vec![end],
                cost: 0.0,
            };
        }

        let start_coord = to_hex(&self.layout, start);
        let end_coord = to_hex(&self.layout, end);
        let (start_index, end_index) =
            match (self.index_of(start_coord), self.index_of(end_coord)) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    debug!(
                        "World path endpoint off grid: {} ({}) -> {} ({})",
                        start, start_coord, end, end_coord
                    );
                    return NavPath::failed(SearchStatus::Fail);
                }
            };

        let result = self.search(start_index, end_index, config, is_obstacle);
        if !result.status.has_path() {
            return NavPath::failed(result.status);
        }

        let z_offset = Point3::new(0.0, 0.0, config.path_point_z_offset);
        let mut points = Vec::with_capacity(result.path.len() + 1);
        points.push(start);
        points.extend(
            result
                .path
                .iter()
                .filter_map(|index| self.get(*index))
                .map(|tile| tile.world_position() + z_offset),
        );

        NavPath {
            status: result.status,
            points,
            cost: result.cost,
        }
    }

    fn search(
        &self,
        start: usize,
        end: usize,
        config: &PathConfig,
        is_obstacle: Option<ObstacleFn<'_>>,
    ) -> PathResult<usize> {
        let mut filter = GridPathFilter::new(self, config);
        if let Some(is_obstacle) = is_obstacle {
            filter = filter.with_obstacles(is_obstacle);
        }
        AStar::new(config.expansion_limit_factor).search(self, start, end, &filter)
    }

    fn tile_mut(&mut self, position: CubeCoord) -> anyhow::Result<&mut Tile> {
        let radius = self.radius;
        self.get_mut(position).ok_or_else(|| {
            anyhow!("no tile at {} in grid of radius {}", position, radius)
        })
    }

    /// Deserialize a grid from JSON. A grid can be serialized into JSON with
    /// [HexGrid::to_json]. Will fail if the input is malformed.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("error deserializing grid")
    }

    /// Serializes this grid into JSON. This is a recoverable format, which
    /// can be loaded back into a [HexGrid] with [HexGrid::from_json].
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("error serializing grid")
    }

    /// Deserialize a grid from binary (CBOR). A grid can be serialized into
    /// binary with [HexGrid::to_bin]. Will fail if the input is malformed.
    #[cfg(feature = "bin")]
    pub fn from_bin(read: impl std::io::Read) -> anyhow::Result<Self> {
        serde_cbor::from_reader(read).context("error deserializing grid")
    }

    /// Serializes this grid into binary (CBOR). This is a recoverable format,
    /// which can be loaded back into a [HexGrid] with [HexGrid::from_bin].
    #[cfg(feature = "bin")]
    pub fn to_bin(&self) -> anyhow::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        serde_cbor::to_writer(&mut buffer, self)
            .context("error serializing grid")?;
        Ok(buffer)
    }
}

impl Graph for HexGrid {
    type NodeRef = usize;

    fn node_count(&self) -> usize {
        self.tiles.len()
    }

    fn is_valid_ref(&self, node: usize) -> bool {
        node < self.tiles.len()
    }

    fn neighbor_count(&self, _node: usize) -> usize {
        crate::hex::DIRECTIONS.len()
    }

    fn neighbor(&self, node: usize, index: usize) -> Option<usize> {
        if index >= crate::hex::DIRECTIONS.len() {
            return None;
        }
        let (position, _) = self.tiles.get_index(node)?;
        self.index_of(position.neighbor(index))
    }
}

/// The persisted form of a grid
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SerializedGrid {
    layout: TileLayout,
    radius: u16,
    tiles: Vec<TileRecord>,
}

impl From<HexGrid> for SerializedGrid {
    fn from(grid: HexGrid) -> Self {
        Self {
            layout: grid.layout,
            radius: grid.radius,
            tiles: grid.tiles.values().map(Tile::to_record).collect(),
        }
    }
}

impl TryFrom<SerializedGrid> for HexGrid {
    type Error = anyhow::Error;

    fn try_from(serialized: SerializedGrid) -> Result<Self, Self::Error> {
        let mut grid = Self::build(serialized.layout, serialized.radius)?;
        if serialized.tiles.len() != grid.len() {
            return Err(anyhow!(
                "expected {} tiles for radius {}, got {}",
                grid.len(),
                serialized.radius,
                serialized.tiles.len()
            ));
        }

        let mut seen = CubeCoordSet::default();
        for record in serialized.tiles {
            if !seen.insert(record.position) {
                return Err(anyhow!("duplicate tile at {}", record.position));
            }
            let tile = grid.tile_mut(record.position)?;
            tile.set_cost(record.cost)?;
            tile.set_blocking(record.blocking);
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{to_world, Orientation};

    #[test]
    fn test_build() {
        let grid = HexGrid::build(TileLayout::default(), 3).unwrap();
        assert_eq!(grid.len(), 37);
        assert_eq!(grid.radius(), 3);
        assert_eq!(
            grid.coordinates().collect::<Vec<_>>(),
            hexagonal_region(3)
        );
        for tile in grid.tiles() {
            assert_eq!(
                tile.world_position(),
                to_world(grid.layout(), tile.position())
            );
        }
    }

    #[test]
    fn test_build_invalid_layout() {
        let layout = TileLayout {
            tile_size: 0.0,
            ..TileLayout::default()
        };
        assert!(HexGrid::build(layout, 3).is_err());
    }

    #[test]
    fn test_build_with_callback() {
        let layout =
            TileLayout::new(Orientation::Pointy, 2.0, Point3::ZERO).unwrap();
        let mut visited = Vec::new();
        let grid = HexGrid::build_with(layout, 2, |step_layout, coord| {
            assert_eq!(*step_layout, layout);
            visited.push(coord);
        })
        .unwrap();
        assert_eq!(visited, grid.coordinates().collect::<Vec<_>>());
    }

    #[test]
    fn test_lookup() {
        let mut grid = HexGrid::build(TileLayout::default(), 2).unwrap();
        let position = CubeCoord::new_qr(1, 1);
        let index = grid.index_of(position).unwrap();
        assert_eq!(grid.get(index).unwrap().position(), position);
        assert_eq!(grid.find_at(position).unwrap().position(), position);

        let outside = CubeCoord::new_qr(3, 0);
        assert!(grid.find_at(outside).is_none());
        assert!(grid.index_of(outside).is_none());
        assert!(grid.get(grid.len()).is_none());
        assert!(grid.set_cost(outside, 2.0).is_err());
        assert!(grid.set_blocking(outside, true).is_err());

        grid.set_cost(position, 3.0).unwrap();
        grid.set_blocking(position, true).unwrap();
        let tile = grid.find_at(position).unwrap();
        assert_eq!(tile.cost(), 3.0);
        assert!(tile.is_blocking());
    }

    #[test]
    fn test_graph_neighbors() {
        let grid = HexGrid::build(TileLayout::default(), 1).unwrap();
        let center = grid.index_of(CubeCoord::ORIGIN).unwrap();
        let neighbors: Vec<usize> = (0..grid.neighbor_count(center))
            .filter_map(|i| grid.neighbor(center, i))
            .collect();
        assert_eq!(neighbors.len(), 6);

        // Edge tiles only have 3 neighbors inside a radius 1 grid
        let edge = grid.index_of(CubeCoord::new_qr(1, 0)).unwrap();
        let count = (0..grid.neighbor_count(edge))
            .filter_map(|i| grid.neighbor(edge, i))
            .count();
        assert_eq!(count, 3);

        assert_eq!(grid.neighbor(center, 6), None);
        assert_eq!(grid.neighbor(grid.len(), 0), None);
    }
}
