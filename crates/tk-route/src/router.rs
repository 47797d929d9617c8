//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The controller routes through the [`Router`] trait, so a lane-aware or
//! threat-weighted search can replace [`DijkstraRouter`] without touching the
//! graph.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tk_core::NodeId;

use crate::error::{RouteError, RouteResult};
use crate::graph::RouteGraph;

// ── RoutePath ────────────────────────────────────────────────────────────────

/// Result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    /// Sum of arc weights along `nodes`.
    pub length: f64,
    /// Waypoints from source to destination, both included.  Empty when the
    /// source is the destination.
    pub nodes:  Vec<NodeId>,
}

impl RoutePath {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The waypoint after the source, if any.
    pub fn next_hop(&self) -> Option<NodeId> {
        self.nodes.get(1).copied()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields an empty, zero-length path rather than an error.
    fn route(&self, graph: &RouteGraph, from: NodeId, to: NodeId) -> RouteResult<RoutePath>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the dense arc matrix.  Each settled node scans a
/// full matrix row, so a query is O(V²) regardless of the heap.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &RouteGraph, from: NodeId, to: NodeId) -> RouteResult<RoutePath> {
        dijkstra(graph, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap key: non-negative finite weights, totally ordered.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(graph: &RouteGraph, from: NodeId, to: NodeId) -> RouteResult<RoutePath> {
    // Validates both ids.
    graph.position(from)?;
    graph.position(to)?;

    if from == to {
        return Ok(RoutePath { length: 0.0, nodes: vec![] });
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![NodeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap: (cost, node).  Secondary key NodeId ensures deterministic
    // tie-breaking.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(&prev, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for (neighbor, weight) in graph.arcs(node)? {
            let new_cost = cost + weight;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Err(RouteError::NoRoute { from, to })
}

fn reconstruct(prev: &[NodeId], to: NodeId, length: f64) -> RoutePath {
    let mut nodes = vec![to];
    let mut cur = to;
    while prev[cur.index()] != NodeId::INVALID {
        cur = prev[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    RoutePath { length, nodes }
}
