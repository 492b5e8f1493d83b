use hexnav::{
    CubeCoord, GridConfig, HexGrid, Orientation, PathConfig, Point3,
    TileConfig, TileLayout,
};
use validator::ValidationErrors;

#[test]
fn test_config_validation() {
    let config = GridConfig {
        layout: TileLayout {
            orientation: Orientation::Flat, // valid
            tile_size: -1.0,                // invalid
            origin: Point3::ZERO,           // valid
        },
        radius: 1001, // invalid (too big)
        pathfinding: PathConfig {
            heuristic_scale: -1.0,        // invalid
            wants_partial_solution: true, // valid
            expansion_limit_factor: 0,    // invalid
            path_point_z_offset: -50.0,   // valid (but weird)
        },
        tiles: vec![],
    };

    // This is a bit of a lazy check but it works well enough
    let err = HexGrid::generate(&config).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    assert_eq!(
        error_fields,
        vec!["layout", "pathfinding", "radius"],
        "incorrect validation errors in {:#?}",
        validation_errors
    );
}

#[test]
fn test_tile_override_validation() {
    // Outside the grid
    let config = GridConfig {
        radius: 2,
        tiles: vec![TileConfig {
            position: CubeCoord::new_qr(3, 0),
            cost: 1.0,
            blocking: true,
        }],
        ..GridConfig::default()
    };
    assert!(HexGrid::generate(&config).is_err());

    // Bad cost
    let config = GridConfig {
        radius: 2,
        tiles: vec![TileConfig {
            position: CubeCoord::new_qr(1, 0),
            cost: 0.0,
            blocking: false,
        }],
        ..GridConfig::default()
    };
    assert!(HexGrid::generate(&config).is_err());
}

#[test]
fn test_config_deserialization() {
    // Everything not given falls back to the defaults
    let config: GridConfig = serde_json::from_str(
        r#"{
            "layout": {"orientation": "pointy", "tile_size": 25.0},
            "radius": 4,
            "pathfinding": {"wants_partial_solution": true},
            "tiles": [
                {"position": [1, -1, 0], "cost": 3.5},
                {"position": [0, 2, -2], "blocking": true}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(config.layout.orientation, Orientation::Pointy);
    assert_eq!(config.layout.tile_size, 25.0);
    assert_eq!(config.layout.origin, Point3::ZERO);
    assert_eq!(config.radius, 4);
    assert_eq!(
        config.pathfinding,
        PathConfig {
            wants_partial_solution: true,
            ..PathConfig::default()
        }
    );

    let grid = HexGrid::generate(&config).unwrap();
    let cheap = grid.find_at(CubeCoord::new_qr(1, -1)).unwrap();
    assert_eq!(cheap.cost(), 3.5);
    assert!(!cheap.is_blocking());
    let wall = grid.find_at(CubeCoord::new_qr(0, 2)).unwrap();
    assert_eq!(wall.cost(), 1.0);
    assert!(wall.is_blocking());
}

#[test]
fn test_config_rejects_bad_coordinate() {
    let result = serde_json::from_str::<GridConfig>(
        r#"{"tiles": [{"position": [1, 1, 1]}]}"#,
    );
    assert!(result.is_err());
}
