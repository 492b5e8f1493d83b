//! Generators for common groups of tiles. Every generator returns its
//! coordinates in a fixed, documented order, so callers can rely on indexes
//! being stable between calls.

use crate::hex::{direction, CubeCoord, FractionalCoord};
use std::cmp;

/// Amount to nudge line endpoints by before interpolating. Without it, lines
/// that run exactly along a tile edge would round inconsistently.
pub const LINE_EPSILON: f64 = 1e-6;

/// Every tile within `radius` steps of the origin. Tiles are emitted in a
/// double loop: `q` ascending from `-radius` to `radius`, then `r` ascending
/// through the range that keeps `s` within bounds too. The output has exactly
/// `3r² + 3r + 1` tiles.
pub fn hexagonal_region(radius: u16) -> Vec<CubeCoord> {
    let len = crate::util::grid_len(radius);
    let radius = i32::from(radius);
    let mut coords = Vec::with_capacity(len);
    for q in -radius..=radius {
        // r bounds depend on q, since we also have to keep s in range
        let r_min = cmp::max(-radius, -q - radius);
        let r_max = cmp::min(radius, -q + radius);
        for r in r_min..=r_max {
            coords.push(CubeCoord::new_qr(q, r));
        }
    }

    debug_assert_eq!(coords.len(), len);
    coords
}

/// The tiles exactly `radius` steps from `center`, winding around it. Starts
/// at `center + direction(4) * radius` and walks `radius` steps in each of
/// the directions 0 through 5. Radius 0 gives just the center.
pub fn ring(center: CubeCoord, radius: u16) -> Vec<CubeCoord> {
    if radius == 0 {
        return vec![center];
    }

    let steps = i32::from(radius);
    let mut coords = Vec::with_capacity(6 * usize::from(radius));
    let mut current = center + direction(4) * steps;
    for i in 0..6 {
        for _ in 0..steps {
            coords.push(current);
            current += direction(i);
        }
    }
    coords
}

/// A straight line of tiles from `a` to `b`, both included. The line always
/// has `distance(a, b) + 1` tiles, and each one is adjacent to the previous.
pub fn line(a: CubeCoord, b: CubeCoord) -> Vec<CubeCoord> {
    let n = a.distance_to(b);
    let nudge = FractionalCoord::new(LINE_EPSILON, LINE_EPSILON, -2.0 * LINE_EPSILON);
    let a_nudged = FractionalCoord::from(a) + nudge;
    let b_nudged = FractionalCoord::from(b) + nudge;
    let step = 1.0 / f64::from(cmp::max(n, 1));

    (0..=n)
        .map(|i| a_nudged.lerp(b_nudged, step * f64::from(i)).round())
        .collect()
}

/// Every tile within `radius` steps of `center`, in the same order as
/// [hexagonal_region].
pub fn range(center: CubeCoord, radius: u16) -> Vec<CubeCoord> {
    hexagonal_region(radius)
        .into_iter()
        .map(|offset| center + offset)
        .collect()
}

/// Every tile that is both within `radius_a` of `center_a` and within
/// `radius_b` of `center_b`. Computed straight from the overlapping bounds on
/// each axis, so neither range gets materialized. When the two ranges are
/// identical, the output matches [range] exactly, order included.
pub fn intersect_ranges(
    center_a: CubeCoord,
    radius_a: u16,
    center_b: CubeCoord,
    radius_b: u16,
) -> Vec<CubeCoord> {
    let (radius_a, radius_b) = (i32::from(radius_a), i32::from(radius_b));
    let bounds = |a: i32, b: i32| {
        (
            cmp::max(a - radius_a, b - radius_b),
            cmp::min(a + radius_a, b + radius_b),
        )
    };
    let (q_min, q_max) = bounds(center_a.q(), center_b.q());
    let (r_min, r_max) = bounds(center_a.r(), center_b.r());
    let (s_min, s_max) = bounds(center_a.s(), center_b.s());

    let mut coords = Vec::new();
    for q in q_min..=q_max {
        let lo = cmp::max(r_min, -q - s_max);
        let hi = cmp::min(r_max, -q - s_min);
        for r in lo..=hi {
            coords.push(CubeCoord::new_qr(q, r));
        }
    }
    coords
}
