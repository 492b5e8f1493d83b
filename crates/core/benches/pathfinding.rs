use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexnav::{CubeCoord, GridConfig, HexGrid, PathConfig, TileLayout};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathfinding");
    group.sample_size(20);

    group.bench_function("grid gen", |b| {
        b.iter(|| {
            HexGrid::generate(black_box(&GridConfig {
                radius: 100,
                ..GridConfig::default()
            }))
        })
    });

    let grid = HexGrid::build(TileLayout::default(), 100).unwrap();
    let config = PathConfig::default();
    let start = CubeCoord::new_qr(-100, 50);
    let end = CubeCoord::new_qr(100, -50);
    group.bench_function("corner to corner", |b| {
        b.iter(|| {
            grid.find_tile_path(black_box(start), black_box(end), &config, None)
        })
    });

    // Wall with a single gap, forcing a wide search
    let mut walled = grid.clone();
    for r in -100..=90 {
        walled.set_blocking(CubeCoord::new_qr(0, r), true).unwrap();
    }
    group.bench_function("around a wall", |b| {
        b.iter(|| {
            walled.find_tile_path(
                black_box(start),
                black_box(end),
                &config,
                None,
            )
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
