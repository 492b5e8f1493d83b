use hexnav::{
    grid_len,
    hex::{self, CubeCoord, CubeCoordSet},
    HexGrid, Orientation, Point3, TileLayout,
};
use serde_test::{assert_de_tokens_error, assert_tokens, Token};

fn layout(orientation: Orientation) -> TileLayout {
    TileLayout::new(orientation, 100.0, Point3::new(-250.0, 40.0, 12.0))
        .unwrap()
}

#[test]
fn test_grid_matches_region() {
    for radius in 0..8 {
        let grid = HexGrid::build(TileLayout::default(), radius).unwrap();
        assert_eq!(grid.len(), grid_len(radius));
        assert!(grid.tiles().all(|tile| {
            CubeCoord::ORIGIN.distance_to(tile.position()) <= radius.into()
        }));
        let unique: CubeCoordSet = grid.coordinates().collect();
        assert_eq!(unique.len(), grid.len());
    }
}

#[test]
fn test_world_round_trip_through_grid() {
    for orientation in [Orientation::Flat, Orientation::Pointy] {
        let layout = layout(orientation);
        let grid = HexGrid::build(layout, 5).unwrap();
        for tile in grid.tiles() {
            let world = tile.world_position();
            assert_eq!(world.z, 12.0);
            assert_eq!(hex::to_hex(&layout, world), tile.position());
            assert_eq!(hex::snap_to_grid(&layout, world), world);
        }
    }
}

#[test]
fn test_rings_partition_region() {
    // Rings 0..=R together cover the region of radius R exactly once
    let center = CubeCoord::new_qr(2, 3);
    let radius = 4;
    let mut seen = CubeCoordSet::default();
    for r in 0..=radius {
        for coord in hex::ring(center, r) {
            assert!(seen.insert(coord), "{} visited twice", coord);
        }
    }
    let region: CubeCoordSet = hex::range(center, radius).into_iter().collect();
    assert_eq!(seen, region);
}

#[test]
fn test_line_stays_within_range() {
    let a = CubeCoord::new_qr(-4, 1);
    let b = CubeCoord::new_qr(3, 2);
    let line = hex::line(a, b);
    let n = a.distance_to(b);
    for (i, coord) in line.iter().enumerate() {
        assert_eq!(a.distance_to(*coord), i as u32);
        assert_eq!(b.distance_to(*coord), n - i as u32);
    }
}

#[test]
fn test_intersect_ranges_matches_filter() {
    let a = CubeCoord::new_qr(-1, 2);
    let b = CubeCoord::new_qr(2, -1);
    for (ra, rb) in [(1, 1), (2, 3), (4, 2), (3, 3)] {
        let expected: CubeCoordSet = hex::range(a, ra)
            .into_iter()
            .filter(|coord| b.distance_to(*coord) <= rb.into())
            .collect();
        let actual: Vec<CubeCoord> = hex::intersect_ranges(a, ra, b, rb);
        assert_eq!(actual.len(), expected.len());
        assert_eq!(actual.into_iter().collect::<CubeCoordSet>(), expected);
    }
}

#[test]
fn test_coord_serde_tokens() {
    assert_tokens(
        &CubeCoord::new_qr(1, -3),
        &[
            Token::Tuple { len: 3 },
            Token::I32(1),
            Token::I32(-3),
            Token::I32(2),
            Token::TupleEnd,
        ],
    );
    assert_de_tokens_error::<CubeCoord>(
        &[
            Token::Tuple { len: 3 },
            Token::I32(1),
            Token::I32(1),
            Token::I32(1),
            Token::TupleEnd,
        ],
        "Invalid cube coordinate (1, 1, 1); must be on the plane q+r+s=0",
    );
}

#[test]
fn test_coord_serde_extreme_components() {
    // Sums to 2^32, which would wrap to 0 in 32-bit arithmetic
    assert_de_tokens_error::<CubeCoord>(
        &[
            Token::Tuple { len: 3 },
            Token::I32(i32::MAX),
            Token::I32(i32::MAX),
            Token::I32(2),
            Token::TupleEnd,
        ],
        "Invalid cube coordinate (2147483647, 2147483647, 2); must be on the \
         plane q+r+s=0",
    );
    assert!(
        serde_json::from_str::<CubeCoord>("[2147483647,2147483647,2]").is_err()
    );
    assert!("2147483647,2147483647,2".parse::<CubeCoord>().is_err());
    assert!("-2147483648,0".parse::<CubeCoord>().is_err());

    let coord: CubeCoord =
        serde_json::from_str("[2147483647,-2147483648,1]").unwrap();
    assert_eq!(
        serde_json::to_string(&coord).unwrap(),
        "[2147483647,-2147483648,1]"
    );
}

#[test]
fn test_grid_serde() {
    let mut grid = HexGrid::build(layout(Orientation::Pointy), 2).unwrap();
    grid.set_cost(CubeCoord::new_qr(1, 0), 2.5).unwrap();
    grid.set_blocking(CubeCoord::new_qr(-1, 1), true).unwrap();

    let json = serde_json::to_value(&grid).unwrap();
    assert_eq!(json["radius"], 2);
    assert_eq!(json["tiles"].as_array().unwrap().len(), 19);
    // World positions aren't persisted
    assert!(json["tiles"][0].get("world_position").is_none());

    let loaded: HexGrid = serde_json::from_value(json).unwrap();
    assert_eq!(loaded, grid);
    let tile = loaded.find_at(CubeCoord::new_qr(1, 0)).unwrap();
    assert_eq!(tile.cost(), 2.5);
    assert_eq!(
        tile.world_position(),
        hex::to_world(loaded.layout(), tile.position())
    );
}

#[test]
fn test_grid_serde_rejects_mismatched_tiles() {
    let grid = HexGrid::build(TileLayout::default(), 1).unwrap();
    let mut json = serde_json::to_value(&grid).unwrap();

    // Too few tiles for the radius
    let mut short = json.clone();
    short["tiles"].as_array_mut().unwrap().pop();
    assert!(serde_json::from_value::<HexGrid>(short).is_err());

    // Tile outside the radius
    json["tiles"][0]["position"] = serde_json::json!([5, -5, 0]);
    assert!(serde_json::from_value::<HexGrid>(json).is_err());
}

#[cfg(feature = "json")]
#[test]
fn test_grid_json() {
    let grid = HexGrid::generate(&hexnav::GridConfig::default()).unwrap();
    let json = grid.to_json().unwrap();
    assert_eq!(HexGrid::from_json(&json).unwrap(), grid);
}

#[cfg(feature = "bin")]
#[test]
fn test_grid_bin() {
    let grid = HexGrid::generate(&hexnav::GridConfig::default()).unwrap();
    let bin = grid.to_bin().unwrap();
    assert_eq!(HexGrid::from_bin(bin.as_slice()).unwrap(), grid);
}
