//! Generic weighted-graph pathfinding.
//!
//! The search doesn't know anything about hexagons. It works over any type
//! that implements [Graph], and every rule about what a step costs and where
//! an agent is allowed to go comes from a [QueryFilter]. The hex grid wires
//! both up in [crate::grid], but other graphs work just as well:
//!
//! ```
//! use hexnav::path::{find_path, Graph, QueryFilter, SearchStatus};
//!
//! /// Nodes 0..len in a straight line
//! struct Line {
//!     len: usize,
//! }
//!
//! impl Graph for Line {
//!     type NodeRef = usize;
//!
//!     fn node_count(&self) -> usize {
//!         self.len
//!     }
//!
//!     fn is_valid_ref(&self, node: usize) -> bool {
//!         node < self.len
//!     }
//!
//!     fn neighbor_count(&self, _: usize) -> usize {
//!         2
//!     }
//!
//!     fn neighbor(&self, node: usize, index: usize) -> Option<usize> {
//!         match index {
//!             0 => node.checked_sub(1),
//!             _ => Some(node + 1),
//!         }
//!     }
//! }
//!
//! struct Uniform;
//!
//! impl QueryFilter<Line> for Uniform {
//!     fn heuristic_cost(&self, from: usize, to: usize) -> f64 {
//!         (from as f64 - to as f64).abs()
//!     }
//!
//!     fn traversal_cost(&self, _: usize, _: usize) -> f64 {
//!         1.0
//!     }
//! }
//!
//! let result = find_path(&Line { len: 10 }, 2, 5, &Uniform);
//! assert_eq!(result.status, SearchStatus::Success);
//! assert_eq!(result.path, vec![3, 4, 5]);
//! ```

mod astar;
mod types;

pub use astar::AStar;
pub use types::{PathResult, SearchStatus};

use std::{fmt::Debug, hash::Hash};

/// A graph that can be searched. Nodes are identified by a small copyable
/// reference type, and edges are enumerated per node by index.
pub trait Graph {
    /// Identifier for a single node. Should be cheap to copy and hash.
    type NodeRef: Copy + Eq + Hash + Debug;

    /// Total number of nodes in the graph. Bounds how much work a single
    /// search is allowed to do.
    fn node_count(&self) -> usize;

    /// Does this reference point to a node in the graph?
    fn is_valid_ref(&self, node: Self::NodeRef) -> bool;

    /// The number of edge slots for a node. Some slots may be empty, see
    /// [Graph::neighbor].
    fn neighbor_count(&self, node: Self::NodeRef) -> usize;

    /// Get the node on the other end of one of a node's edges. `None` means
    /// there's no node in that slot (e.g. off the edge of a map), and the
    /// search will skip it.
    fn neighbor(
        &self,
        node: Self::NodeRef,
        index: usize,
    ) -> Option<Self::NodeRef>;
}

/// Rules for a single query: how much steps cost, how far away the goal
/// looks, and which steps are forbidden.
pub trait QueryFilter<G: Graph + ?Sized> {
    /// Multiplier applied to every heuristic estimate. Values above 1 make
    /// the search greedier (faster, possibly suboptimal). 0 turns the search
    /// into plain Dijkstra.
    fn heuristic_scale(&self) -> f64 {
        1.0
    }

    /// Estimated cost from `from` to `to`. Must be non-negative. The search
    /// finds optimal paths only if this never overestimates.
    fn heuristic_cost(&self, from: G::NodeRef, to: G::NodeRef) -> f64;

    /// Real cost of stepping from `from` to its neighbor `to`. Must be
    /// positive.
    fn traversal_cost(&self, from: G::NodeRef, to: G::NodeRef) -> f64;

    /// Can an agent step from `from` to its neighbor `to` at all?
    fn is_traversal_allowed(&self, _from: G::NodeRef, _to: G::NodeRef) -> bool {
        true
    }

    /// If the goal can't be reached, should the search return a path to the
    /// closest node it did reach instead of nothing?
    fn wants_partial_solution(&self) -> bool {
        false
    }
}

/// Find the cheapest path between two nodes, using the default search
/// settings. See [AStar::search].
pub fn find_path<G, F>(
    graph: &G,
    start: G::NodeRef,
    end: G::NodeRef,
    filter: &F,
) -> PathResult<G::NodeRef>
where
    G: Graph + ?Sized,
    F: QueryFilter<G> + ?Sized,
{
    AStar::default().search(graph, start, end, filter)
}

/// Check if any full path exists between two nodes. Partial solutions don't
/// count, even if the filter asks for them.
pub fn path_exists<G, F>(
    graph: &G,
    start: G::NodeRef,
    end: G::NodeRef,
    filter: &F,
) -> bool
where
    G: Graph + ?Sized,
    F: QueryFilter<G> + ?Sized,
{
    find_path(graph, start, end, filter).status == SearchStatus::Success
}
