//! Search result types, plus the open-set entry used internally by the search.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::Display;

/// Outcome of a single search.
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SearchStatus {
    /// Reached the goal
    Success,
    /// Couldn't reach the goal, but found a path to the node that looked
    /// closest to it. Only returned when the filter asks for partial
    /// solutions.
    Partial,
    /// Ran out of nodes to explore without reaching the goal
    GoalUnreachable,
    /// Start or end doesn't refer to a node in the graph
    Fail,
    /// Gave up after expanding far more nodes than the graph should need
    InfiniteLoop,
}

impl SearchStatus {
    /// Does this result carry a usable path (full or partial)?
    pub fn has_path(self) -> bool {
        matches!(self, Self::Success | Self::Partial)
    }
}

/// Result of a search. The path never includes the start node, so a search
/// from a node to itself succeeds with an empty path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathResult<N> {
    pub status: SearchStatus,
    /// Nodes to step through, in order, ending at the goal (or the best
    /// partial node). Empty for any failure.
    pub path: Vec<N>,
    /// Sum of traversal costs along the path. 0 if there's no path.
    pub cost: f64,
    /// Number of nodes the search expanded
    pub nodes_expanded: usize,
}

impl<N> PathResult<N> {
    /// Create a result with no path
    pub(super) fn failed(status: SearchStatus, nodes_expanded: usize) -> Self {
        Self {
            status,
            path: Vec::new(),
            cost: 0.0,
            nodes_expanded,
        }
    }

    /// Number of steps in the path
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// An entry in the open set. Ordering is reversed so that a max-heap pops the
/// lowest total cost first. Ties go to the lower heuristic (the node closer to
/// the goal), then to whichever entry was pushed first.
#[derive(Copy, Clone, Debug)]
pub(super) struct OpenNode<N> {
    pub node: N,
    /// Cost from the start at the time this entry was pushed
    pub g_cost: f64,
    /// g_cost + scaled heuristic
    pub f_cost: f64,
    pub h_cost: f64,
    pub sequence: usize,
}

impl<N> Eq for OpenNode<N> {}

impl<N> PartialEq for OpenNode<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Ord for OpenNode<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.h_cost.total_cmp(&self.h_cost))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<N> PartialOrd for OpenNode<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
