//! Conversions between hex space and continuous world space. Every conversion
//! is parameterized by a [TileLayout], which picks one of the two fixed
//! [Orientation] presets and scales/offsets its transform.

use crate::hex::{CubeCoord, FractionalCoord};
use derive_more::{Add, Display, Mul, Sub};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use validator::{Validate, ValidationError, ValidationErrors};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A point in continuous world space. `x` and `y` span the plane that the
/// grid lies on, `z` is vertical and is never used by hex math other than to
/// be carried through.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Add,
    Sub,
    Mul,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", x, y, z)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance between two points.
    pub fn distance_to(self, other: Point3) -> f64 {
        let d = self - other;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }

    /// Check that every component is a real number (not NaN or infinite).
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Check if two points are within `tolerance` of each other on every
    /// axis.
    pub fn nearly_equals(self, other: Point3, tolerance: f64) -> bool {
        crate::util::approx_eq(self.x, other.x, tolerance)
            && crate::util::approx_eq(self.y, other.y, tolerance)
            && crate::util::approx_eq(self.z, other.z, tolerance)
    }
}

/// The two ways hexagons can sit on a grid. Flat-top tiles have a flat edge at
/// the top and bottom; pointy-top tiles have a vertex there instead.
///
/// Both presets use a left-handed world frame, so don't be surprised by the
/// negative terms in the forward matrices.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    Flat,
    Pointy,
}

impl Orientation {
    /// Forward (hex to world) matrix, row-major `[f0, f1, f2, f3]`.
    pub fn forward(self) -> [f64; 4] {
        match self {
            Self::Flat => [-SQRT_3 / 2.0, -SQRT_3, 3.0 / 2.0, 0.0],
            Self::Pointy => [0.0, -3.0 / 2.0, SQRT_3, SQRT_3 / 2.0],
        }
    }

    /// Inverse (world to hex) matrix, row-major `[b0, b1, b2, b3]`.
    pub fn inverse(self) -> [f64; 4] {
        match self {
            Self::Flat => [0.0, 2.0 / 3.0, SQRT_3 / 3.0, -1.0 / 3.0],
            Self::Pointy => [1.0 / 3.0, SQRT_3 / 3.0, -2.0 / 3.0, 0.0],
        }
    }

    fn forward_matrix(self) -> Matrix2<f64> {
        let [f0, f1, f2, f3] = self.forward();
        Matrix2::new(f0, f1, f2, f3)
    }

    fn inverse_matrix(self) -> Matrix2<f64> {
        let [b0, b1, b2, b3] = self.inverse();
        Matrix2::new(b0, b1, b2, b3)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Flat
    }
}

/// Everything needed to place hex tiles in world space.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayout {
    pub orientation: Orientation,
    /// Distance from the center of a tile to any of its vertices, in world
    /// units. Must be positive.
    pub tile_size: f64,
    /// World position of the tile at [CubeCoord::ORIGIN].
    pub origin: Point3,
}

impl TileLayout {
    /// Create a new layout, failing if the tile size isn't a positive finite
    /// number.
    pub fn new(
        orientation: Orientation,
        tile_size: f64,
        origin: Point3,
    ) -> anyhow::Result<Self> {
        let layout = Self {
            orientation,
            tile_size,
            origin,
        };
        layout.validate()?;
        Ok(layout)
    }
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            orientation: Orientation::Flat,
            tile_size: 100.0,
            origin: Point3::ZERO,
        }
    }
}

impl Validate for TileLayout {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            let mut error = ValidationError::new("positive");
            error.add_param(Cow::from("value"), &self.tile_size);
            errors.add("tile_size", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Get the world position of the center of a tile. The vertical axis is taken
/// straight from the layout origin.
pub fn to_world(layout: &TileLayout, coord: CubeCoord) -> Point3 {
    let hex = Vector2::new(f64::from(coord.q()), f64::from(coord.r()));
    let planar = layout.orientation.forward_matrix() * hex * layout.tile_size;
    Point3::new(
        planar.x + layout.origin.x,
        planar.y + layout.origin.y,
        layout.origin.z,
    )
}

/// Map a world position into fractional hex space, without snapping it to a
/// tile. The vertical axis is ignored.
pub fn to_fractional(layout: &TileLayout, point: Point3) -> FractionalCoord {
    let planar = Vector2::new(
        (point.x - layout.origin.x) / layout.tile_size,
        (point.y - layout.origin.y) / layout.tile_size,
    );
    let hex = layout.orientation.inverse_matrix() * planar;
    let (a, b) = (hex.x, hex.y);
    match layout.orientation {
        // Flat-top's inverse yields q and s
        Orientation::Flat => FractionalCoord::new(a, -a - b, b),
        Orientation::Pointy => FractionalCoord::new(a, b, -a - b),
    }
}

/// Get the tile that contains a world position. The position must be finite,
/// see [hex_round].
pub fn to_hex(layout: &TileLayout, point: Point3) -> CubeCoord {
    hex_round(to_fractional(layout, point))
}

/// Move a world position to the center of the tile that contains it. The
/// vertical axis of the input is kept as-is.
pub fn snap_to_grid(layout: &TileLayout, point: Point3) -> Point3 {
    let mut snapped = to_world(layout, to_hex(layout, point));
    snapped.z = point.z;
    snapped
}

/// Round a fractional coordinate to the tile that contains it. Each component
/// is rounded to the nearest integer (halves round up), then the component
/// that moved the most is recomputed from the other two so that the result
/// lands back on the `q + r + s = 0` plane. Ties fall through in the order
/// q, r, s.
///
/// The input must be finite. NaN and infinite components have no containing
/// tile, and the result for them is meaningless (NaN lands on the origin).
/// Check [Point3::is_finite] on untrusted world positions first.
///
/// https://www.redblobgames.com/grids/hexagons/#rounding
pub fn hex_round(coord: FractionalCoord) -> CubeCoord {
    fn round_half_up(value: f64) -> f64 {
        (value + 0.5).floor()
    }

    let q = round_half_up(coord.q);
    let r = round_half_up(coord.r);
    let s = round_half_up(coord.s);

    let dq = (q - coord.q).abs();
    let dr = (r - coord.r).abs();
    let ds = (s - coord.s).abs();

    // Rounded values are integral and tiny for any real grid, so the casts
    // are exact
    let (q, r, s) = (q as i32, r as i32, s as i32);
    if dq > dr && dq > ds {
        CubeCoord::new_rs(r, s)
    } else if dr > ds {
        CubeCoord::new_qs(q, s)
    } else {
        CubeCoord::new_qr(q, r)
    }
}

/// Generate the world positions of a hexagonal region of tiles around each of
/// the given centers. `spacing` is the tile size used for the transform, and
/// the output is grouped by center, in the same order as
/// [hexagonal_region](super::hexagonal_region). Points are placed on the
/// `z = 0` plane; projecting them onto real geometry is up to the caller.
pub fn grid_points_around(
    orientation: Orientation,
    spacing: f64,
    radius: u16,
    centers: &[Point3],
) -> Vec<Point3> {
    let region = super::hexagonal_region(radius);
    let mut points = Vec::with_capacity(region.len() * centers.len());
    for center in centers {
        let layout = TileLayout {
            orientation,
            tile_size: spacing,
            origin: Point3::new(center.x, center.y, 0.0),
        };
        points.extend(region.iter().map(|coord| to_world(&layout, *coord)));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::hexagonal_region;
    use assert_approx_eq::assert_approx_eq;
    use strum::IntoEnumIterator;

    fn layout(orientation: Orientation) -> TileLayout {
        TileLayout::new(orientation, 50.0, Point3::new(10.0, -20.0, 5.0))
            .unwrap()
    }

    #[test]
    fn test_layout_validation() {
        assert!(TileLayout::new(Orientation::Flat, 1.0, Point3::ZERO).is_ok());
        assert!(TileLayout::new(Orientation::Flat, 0.0, Point3::ZERO).is_err());
        assert!(
            TileLayout::new(Orientation::Pointy, -3.0, Point3::ZERO).is_err()
        );
        assert!(TileLayout::new(Orientation::Pointy, f64::NAN, Point3::ZERO)
            .is_err());
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("flat".parse::<Orientation>().unwrap(), Orientation::Flat);
        assert_eq!(
            "pointy".parse::<Orientation>().unwrap(),
            Orientation::Pointy
        );
        assert_eq!(Orientation::Pointy.to_string(), "pointy");
    }

    #[test]
    fn test_to_world() {
        let flat = layout(Orientation::Flat);
        let origin = to_world(&flat, CubeCoord::ORIGIN);
        assert_eq!(origin, Point3::new(10.0, -20.0, 5.0));

        let p = to_world(&flat, CubeCoord::new_qr(1, 0));
        assert_approx_eq!(p.x, 10.0 - SQRT_3 / 2.0 * 50.0);
        assert_approx_eq!(p.y, -20.0 + 75.0);
        assert_approx_eq!(p.z, 5.0);

        let pointy = layout(Orientation::Pointy);
        let p = to_world(&pointy, CubeCoord::new_qr(0, 1));
        assert_approx_eq!(p.x, 10.0 - 75.0);
        assert_approx_eq!(p.y, -20.0 + SQRT_3 / 2.0 * 50.0);
    }

    #[test]
    fn test_round_trip() {
        for orientation in Orientation::iter() {
            let layout = layout(orientation);
            for coord in hexagonal_region(6) {
                let world = to_world(&layout, coord);
                assert_eq!(
                    to_hex(&layout, world),
                    coord,
                    "round trip failed for {} ({})",
                    coord,
                    orientation
                );
            }
        }
    }

    #[test]
    fn test_adjacent_tiles_are_evenly_spaced() {
        for orientation in Orientation::iter() {
            let layout = layout(orientation);
            let center = to_world(&layout, CubeCoord::ORIGIN);
            for neighbor in CubeCoord::ORIGIN.neighbors() {
                let distance =
                    center.distance_to(to_world(&layout, neighbor));
                assert_approx_eq!(distance, SQRT_3 * 50.0, 1e-9);
            }
        }
    }

    #[test]
    fn test_snap_to_grid() {
        let layout = layout(Orientation::Pointy);
        let tile = CubeCoord::new_qr(2, -1);
        let center = to_world(&layout, tile);
        let nudged = Point3::new(center.x + 3.0, center.y - 4.0, 123.0);
        let snapped = snap_to_grid(&layout, nudged);
        assert_approx_eq!(snapped.x, center.x);
        assert_approx_eq!(snapped.y, center.y);
        assert_approx_eq!(snapped.z, 123.0);
    }

    #[test]
    fn test_hex_round_branches() {
        // q moved the most
        assert_eq!(
            hex_round(FractionalCoord::new(0.4375, 0.25, -0.6875)),
            CubeCoord::new_qr(1, 0)
        );
        // r moved the most
        assert_eq!(
            hex_round(FractionalCoord::new(0.25, 0.4375, -0.6875)),
            CubeCoord::new_qr(0, 1)
        );
        // s moved the most
        assert_eq!(
            hex_round(FractionalCoord::new(0.1875, 0.125, -0.3125)),
            CubeCoord::ORIGIN
        );
        // dq == ds, so q isn't strictly largest and s gets recomputed
        assert_eq!(
            hex_round(FractionalCoord::new(0.375, 0.25, -0.625)),
            CubeCoord::ORIGIN
        );
        // Integral input is left alone
        assert_eq!(
            hex_round(FractionalCoord::new(3.0, -5.0, 2.0)),
            CubeCoord::new_qr(3, -5)
        );
    }

    #[test]
    fn test_grid_points_around() {
        let centers = [Point3::new(0.0, 0.0, 9.0), Point3::new(500.0, 0.0, 0.0)];
        let points =
            grid_points_around(Orientation::Flat, 100.0, 2, &centers);
        let per_center = hexagonal_region(2).len();
        assert_eq!(points.len(), per_center * 2);

        // The origin tile of each region sits right on its center
        let first_origin = hexagonal_region(2)
            .iter()
            .position(|coord| *coord == CubeCoord::ORIGIN)
            .unwrap();
        assert_eq!(points[first_origin], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(
            points[per_center + first_origin],
            Point3::new(500.0, 0.0, 0.0)
        );
        assert!(points.iter().all(|point| point.z == 0.0));
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point3::new(1.0, -2.0, 3.0).is_finite());
        assert!(!Point3::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Point3::new(0.0, f64::INFINITY, 0.0).is_finite());
        assert!(!Point3::new(0.0, 0.0, f64::NEG_INFINITY).is_finite());
    }
}
