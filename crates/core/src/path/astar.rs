use crate::path::{
    types::{OpenNode, PathResult, SearchStatus},
    Graph, QueryFilter,
};
use fnv::FnvBuildHasher;
use log::{debug, trace};
use std::collections::{hash_map::Entry, BinaryHeap, HashMap};

/// Bookkeeping for a node the search has reached
#[derive(Copy, Clone, Debug)]
struct NodeRecord<N> {
    parent: Option<N>,
    g_cost: f64,
    closed: bool,
}

/// Best-first search over a [Graph]. Holds the settings that apply across
/// queries. All per-query state is allocated inside [AStar::search] and
/// dropped when it returns, so one instance can be shared freely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AStar {
    expansion_limit_factor: usize,
}

impl AStar {
    /// Default multiplier for the expansion ceiling. A well-behaved search
    /// expands each node at most a handful of times, so anything past this
    /// means the graph or filter is broken.
    pub const DEFAULT_EXPANSION_LIMIT_FACTOR: usize = 8;

    /// Create a search that gives up with [SearchStatus::InfiniteLoop] after
    /// expanding more than `expansion_limit_factor * graph.node_count()`
    /// nodes. The factor is clamped to at least 1.
    pub fn new(expansion_limit_factor: usize) -> Self {
        Self {
            expansion_limit_factor: expansion_limit_factor.max(1),
        }
    }

    pub fn expansion_limit_factor(&self) -> usize {
        self.expansion_limit_factor
    }

    /// Find the cheapest path from `start` to `end`. The returned path
    /// excludes `start` and ends at `end` on success. Never panics on search
    /// outcomes: invalid endpoints, an exhausted open set and a runaway search
    /// are all reported through [PathResult::status].
    pub fn search<G, F>(
        &self,
        graph: &G,
        start: G::NodeRef,
        end: G::NodeRef,
        filter: &F,
    ) -> PathResult<G::NodeRef>
    where
        G: Graph + ?Sized,
        F: QueryFilter<G> + ?Sized,
    {
        trace!("[AStar] search: start={:?} end={:?}", start, end);

        if !graph.is_valid_ref(start) || !graph.is_valid_ref(end) {
            debug!(
                "[AStar] FAILED: invalid endpoint (start={:?} end={:?})",
                start, end
            );
            return PathResult::failed(SearchStatus::Fail, 0);
        }
        if start == end {
            return PathResult {
                status: SearchStatus::Success,
                path: Vec::new(),
                cost: 0.0,
                nodes_expanded: 0,
            };
        }

        let heuristic_scale = filter.heuristic_scale();
        let expansion_limit =
            graph.node_count().saturating_mul(self.expansion_limit_factor);

        let mut open_set = BinaryHeap::new();
        let mut records: HashMap<G::NodeRef, NodeRecord<G::NodeRef>, _> =
            HashMap::with_hasher(FnvBuildHasher::default());
        let mut sequence = 0;

        let start_h = filter.heuristic_cost(start, end);
        open_set.push(OpenNode {
            node: start,
            g_cost: 0.0,
            f_cost: start_h * heuristic_scale,
            h_cost: start_h,
            sequence,
        });
        records.insert(
            start,
            NodeRecord {
                parent: None,
                g_cost: 0.0,
                closed: false,
            },
        );

        // Closest node to the goal so far, by heuristic
        let mut best = (start, start_h);
        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            let record = match records.get_mut(&current.node) {
                Some(record) => record,
                None => continue,
            };
            // Skip entries that were superseded by a cheaper push
            if record.closed || current.g_cost > record.g_cost {
                continue;
            }
            record.closed = true;

            if current.node == end {
                return self.reconstruct_path(
                    graph,
                    &records,
                    end,
                    SearchStatus::Success,
                    nodes_expanded,
                );
            }

            nodes_expanded += 1;
            if nodes_expanded > expansion_limit {
                debug!(
                    "[AStar] FAILED: InfiniteLoop after expanding {} nodes \
                     (limit {})",
                    nodes_expanded, expansion_limit
                );
                return PathResult::failed(
                    SearchStatus::InfiniteLoop,
                    nodes_expanded,
                );
            }

            for i in 0..graph.neighbor_count(current.node) {
                let neighbor = match graph.neighbor(current.node, i) {
                    Some(neighbor) if graph.is_valid_ref(neighbor) => neighbor,
                    _ => continue,
                };
                if !filter.is_traversal_allowed(current.node, neighbor) {
                    continue;
                }

                let step_cost = filter.traversal_cost(current.node, neighbor);
                debug_assert!(
                    step_cost > 0.0,
                    "traversal cost must be positive, got {} for {:?} -> {:?}",
                    step_cost,
                    current.node,
                    neighbor
                );
                let g_cost = current.g_cost + step_cost;

                match records.entry(neighbor) {
                    Entry::Occupied(mut entry) => {
                        let record = entry.get_mut();
                        if g_cost >= record.g_cost {
                            continue;
                        }
                        // Cheaper route found, reopen the node
                        record.parent = Some(current.node);
                        record.g_cost = g_cost;
                        record.closed = false;
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(NodeRecord {
                            parent: Some(current.node),
                            g_cost,
                            closed: false,
                        });
                    }
                }

                let h_cost = filter.heuristic_cost(neighbor, end);
                if h_cost < best.1 {
                    best = (neighbor, h_cost);
                }
                sequence += 1;
                open_set.push(OpenNode {
                    node: neighbor,
                    g_cost,
                    f_cost: g_cost + h_cost * heuristic_scale,
                    h_cost,
                    sequence,
                });
            }
        }

        let (best_node, best_h) = best;
        if filter.wants_partial_solution() && best_node != start {
            debug!(
                "[AStar] goal unreachable, returning partial path to {:?} \
                 (h={:.2}) after expanding {} nodes",
                best_node, best_h, nodes_expanded
            );
            return self.reconstruct_path(
                graph,
                &records,
                best_node,
                SearchStatus::Partial,
                nodes_expanded,
            );
        }

        debug!(
            "[AStar] FAILED: GoalUnreachable after expanding {} nodes",
            nodes_expanded
        );
        PathResult::failed(SearchStatus::GoalUnreachable, nodes_expanded)
    }

    /// Walk parent links back from `target` to the start. The walk is capped
    /// at the graph size, so a corrupted parent chain is reported as a loop
    /// instead of hanging.
    fn reconstruct_path<G>(
        &self,
        graph: &G,
        records: &HashMap<
            G::NodeRef,
            NodeRecord<G::NodeRef>,
            FnvBuildHasher,
        >,
        target: G::NodeRef,
        status: SearchStatus,
        nodes_expanded: usize,
    ) -> PathResult<G::NodeRef>
    where
        G: Graph + ?Sized,
    {
        let cost = records.get(&target).map_or(0.0, |record| record.g_cost);
        let mut path = Vec::new();
        let mut current = target;
        while let Some(parent) =
            records.get(&current).and_then(|record| record.parent)
        {
            path.push(current);
            if path.len() > graph.node_count() {
                debug!("[AStar] FAILED: cycle in parent chain at {:?}", current);
                return PathResult::failed(
                    SearchStatus::InfiniteLoop,
                    nodes_expanded,
                );
            }
            current = parent;
        }
        path.reverse();

        trace!(
            "[AStar] {}: {} steps, cost={:.2}, nodes_expanded={}",
            status,
            path.len(),
            cost,
            nodes_expanded
        );
        PathResult {
            status,
            path,
            cost,
            nodes_expanded,
        }
    }
}

impl Default for AStar {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXPANSION_LIMIT_FACTOR)
    }
}
