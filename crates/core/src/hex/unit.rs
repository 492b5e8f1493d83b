//! This sub-module contains the basic coordinate types that make up the hex
//! coordinate system. See the parent module documentation for more info on the
//! coordinate system.

use anyhow::{anyhow, bail};
use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A point in the hex coordinate system that refers to a whole tile (via its
/// center point). Each coordinate has three integer components, and **for
/// every valid coordinate, `q + r + s = 0`**. There is no way to construct a
/// coordinate that breaks this rule: the checked constructor rejects it, and
/// the two-component constructors derive the third value.
///
/// Equality and hashing are structural. Arithmetic is componentwise, and since
/// the sum (or difference, or scalar multiple) of two zero-sum triples is
/// itself zero-sum, every operation here preserves the invariant.
///
/// Serialized as a `[q, r, s]` array. Deserialization goes through
/// [CubeCoord::new], so malformed input is rejected rather than normalized.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    Add,
    Sub,
    Mul,
    Neg,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", q, r, s)]
#[serde(try_from = "[i32; 3]", into = "[i32; 3]")]
pub struct CubeCoord {
    q: i32,
    r: i32,
    s: i32,
}

impl CubeCoord {
    pub const ORIGIN: Self = Self::new_qr(0, 0);

    /// Construct a new coordinate from all three components. Returns an error
    /// if the components don't fall on the plane `q + r + s = 0`.
    pub fn new(q: i32, r: i32, s: i32) -> anyhow::Result<Self> {
        // Summed wide so extreme components can't wrap back to zero
        if i64::from(q) + i64::from(r) + i64::from(s) != 0 {
            Err(anyhow!(
                "Invalid cube coordinate ({}, {}, {}); must be on the plane q+r+s=0",
                q,
                r,
                s
            ))
        } else {
            Ok(Self { q, r, s })
        }
    }

    /// Construct a new coordinate with the given q and r, deriving s. Returns
    /// an error if s doesn't fit in an `i32`.
    pub fn try_new_qr(q: i32, r: i32) -> anyhow::Result<Self> {
        let s = q
            .checked_neg()
            .and_then(|neg_q| neg_q.checked_sub(r))
            .ok_or_else(|| {
                anyhow!("Cube coordinate ({}, {}, _) is out of range", q, r)
            })?;
        Ok(Self { q, r, s })
    }

    /// Construct a new coordinate with the given q and r. Since q+r+s=0 for
    /// all coordinates, we can derive s from q & r. The components must be
    /// small enough that `-q - r` fits in an `i32`; use
    /// [Self::try_new_qr] for untrusted input.
    pub const fn new_qr(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Construct a new coordinate with the given q and s, deriving r.
    pub const fn new_qs(q: i32, s: i32) -> Self {
        Self::new_qr(q, -q - s)
    }

    /// Construct a new coordinate with the given r and s, deriving q.
    pub const fn new_rs(r: i32, s: i32) -> Self {
        Self::new_qr(-r - s, r)
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn s(&self) -> i32 {
        self.s
    }

    /// Calculate the path distance between two tiles, meaning the number of
    /// hops it takes to get from one to the other. 0 if the coordinates are
    /// equal, 1 if the tiles are adjacent, 2 if there is 1 tile between them,
    /// etc.
    pub fn distance_to(self, other: CubeCoord) -> u32 {
        // https://www.redblobgames.com/grids/hexagons/#distances
        let diff = self - other;
        diff.q
            .unsigned_abs()
            .max(diff.r.unsigned_abs())
            .max(diff.s.unsigned_abs())
    }

    /// Get the tile adjacent to this one in the given direction. See
    /// [direction] for the index layout. Panics if `direction >= 6`.
    pub fn neighbor(self, direction: usize) -> CubeCoord {
        self + self::direction(direction)
    }

    /// Get the tile diagonal to this one in the given direction, i.e. the
    /// tile two steps away that sits past the vertex between two neighbors.
    /// See [diagonal] for the index layout. Panics if `direction >= 6`.
    pub fn diagonal_neighbor(self, direction: usize) -> CubeCoord {
        self + diagonal(direction)
    }

    /// Get an iterator of all the tiles directly adjacent to this one, in
    /// direction index order. The iterator always contains exactly 6 values.
    pub fn neighbors(self) -> impl Iterator<Item = CubeCoord> {
        DIRECTIONS.iter().map(move |dir| self + *dir)
    }

    /// Rotate this coordinate 60° to the right around `center`. For a
    /// neighbor of `center`, this steps one index down the [DIRECTIONS]
    /// table (wrapping from 0 to 5).
    pub fn rotate_right_60(self, center: CubeCoord) -> CubeCoord {
        let v = self - center;
        // (q, r, s) -> (-r, -s, -q)
        center + Self::new_unchecked(-v.r, -v.s, -v.q)
    }

    /// Rotate this coordinate 60° to the left around `center`. This is the
    /// exact inverse of [Self::rotate_right_60].
    pub fn rotate_left_60(self, center: CubeCoord) -> CubeCoord {
        let v = self - center;
        // (q, r, s) -> (-s, -q, -r)
        center + Self::new_unchecked(-v.s, -v.q, -v.r)
    }

    /// Only for use when the inputs are already known to sum to zero, e.g.
    /// when permuting the components of an existing coordinate.
    fn new_unchecked(q: i32, r: i32, s: i32) -> Self {
        debug_assert_eq!(
            i64::from(q) + i64::from(r) + i64::from(s),
            0,
            "bad permutation ({q}, {r}, {s})"
        );
        Self { q, r, s }
    }
}

impl TryFrom<[i32; 3]> for CubeCoord {
    type Error = anyhow::Error;

    fn try_from([q, r, s]: [i32; 3]) -> Result<Self, Self::Error> {
        Self::new(q, r, s)
    }
}

impl From<CubeCoord> for [i32; 3] {
    fn from(coord: CubeCoord) -> Self {
        [coord.q, coord.r, coord.s]
    }
}

/// Parse a coordinate from text. Accepts either three components (`q,r,s`)
/// which are validated, or two (`q,r`) which are treated as axial. Surrounding
/// parentheses and whitespace are ignored, so the display format of a
/// coordinate can be parsed back.
impl FromStr for CubeCoord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let components = trimmed
            .split(',')
            .map(|component| {
                component.trim().parse::<i32>().map_err(|err| {
                    anyhow!("invalid coordinate component {:?}: {}", component, err)
                })
            })
            .collect::<anyhow::Result<Vec<i32>>>()?;
        match components.as_slice() {
            [q, r] => Self::try_new_qr(*q, *r),
            [q, r, s] => Self::new(*q, *r, *s),
            _ => bail!(
                "expected 2 or 3 coordinate components, got {:?}",
                s
            ),
        }
    }
}

/// The reduced two-axis form of a [CubeCoord]. `s` is implicit (`-q - r`), so
/// every axial coordinate maps to exactly one cube coordinate and back.
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[display(fmt = "({}, {})", q, r)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

impl From<AxialCoord> for CubeCoord {
    fn from(axial: AxialCoord) -> Self {
        Self::new_qr(axial.q, axial.r)
    }
}

impl From<CubeCoord> for AxialCoord {
    fn from(cube: CubeCoord) -> Self {
        Self::new(cube.q, cube.r)
    }
}

/// A real-valued cube coordinate, prior to rounding onto a tile. The
/// `q + r + s = 0` invariant only holds approximately here, which is exactly
/// why [FractionalCoord::round] has to pick a component to correct.
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Add, Sub, Mul, Serialize, Deserialize,
)]
#[display(fmt = "({}, {}, {})", q, r, s)]
pub struct FractionalCoord {
    pub q: f64,
    pub r: f64,
    pub s: f64,
}

impl FractionalCoord {
    pub const fn new(q: f64, r: f64, s: f64) -> Self {
        Self { q, r, s }
    }

    /// Linear interpolation between two coordinates, componentwise. `t = 0`
    /// gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: FractionalCoord, t: f64) -> FractionalCoord {
        fn lerp(a: f64, b: f64, t: f64) -> f64 {
            a + (b - a) * t
        }

        Self::new(
            lerp(self.q, other.q, t),
            lerp(self.r, other.r, t),
            lerp(self.s, other.s, t),
        )
    }

    /// Snap to the tile containing this point. See [super::hex_round].
    pub fn round(self) -> CubeCoord {
        super::hex_round(self)
    }
}

impl From<CubeCoord> for FractionalCoord {
    fn from(coord: CubeCoord) -> Self {
        Self::new(coord.q.into(), coord.r.into(), coord.s.into())
    }
}

/// Unit offsets to each of the 6 adjacent tiles, in winding order: each
/// entry is the previous one rotated 60° to the left. The values don't depend
/// on orientation, only where they land in world space does.
///
/// https://www.redblobgames.com/grids/hexagons/#neighbors
pub const DIRECTIONS: [CubeCoord; 6] = [
    CubeCoord::new_qr(0, 1),
    CubeCoord::new_qr(1, 0),
    CubeCoord::new_qr(1, -1),
    CubeCoord::new_qr(0, -1),
    CubeCoord::new_qr(-1, 0),
    CubeCoord::new_qr(-1, 1),
];

/// Offsets to the 6 diagonal tiles (two steps away, across a vertex). Entry
/// `i` sits between directions `i` and `i + 1` (wrapping).
pub const DIAGONALS: [CubeCoord; 6] = [
    CubeCoord::new_qr(1, 1),
    CubeCoord::new_qr(2, -1),
    CubeCoord::new_qr(1, -2),
    CubeCoord::new_qr(-1, -1),
    CubeCoord::new_qr(-2, 1),
    CubeCoord::new_qr(-1, 2),
];

/// Get one of the 6 unit directions. Panics if `index >= 6`, since any other
/// value means the caller has a bug.
pub fn direction(index: usize) -> CubeCoord {
    assert!(index < DIRECTIONS.len(), "invalid direction index {}", index);
    DIRECTIONS[index]
}

/// Get one of the 6 diagonal offsets. Panics if `index >= 6`.
pub fn diagonal(index: usize) -> CubeCoord {
    assert!(index < DIAGONALS.len(), "invalid diagonal index {}", index);
    DIAGONALS[index]
}
