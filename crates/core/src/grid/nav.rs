use crate::{hex::Point3, path::SearchStatus};
use serde::{Deserialize, Serialize};

/// A path through world space, ready for an agent to follow. The first point
/// is always the location the query started from (unless the query failed,
/// in which case there are no points at all).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavPath {
    pub status: SearchStatus,
    pub points: Vec<Point3>,
    /// Sum of tile costs along the path
    pub cost: f64,
}

impl NavPath {
    pub(super) fn failed(status: SearchStatus) -> Self {
        Self {
            status,
            points: Vec::new(),
            cost: 0.0,
        }
    }

    /// Does this path lead anywhere (fully or partially)?
    pub fn is_valid(&self) -> bool {
        self.status.has_path() && !self.points.is_empty()
    }

    /// Did the path stop short of the requested goal?
    pub fn is_partial(&self) -> bool {
        self.status == SearchStatus::Partial
    }

    /// Number of segments in the path, i.e. one less than the number of
    /// points.
    pub fn length(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Total world-space distance covered by the path.
    pub fn world_distance(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(pair[1]))
            .sum()
    }
}
