//! Constrained shortest-path search.
//!
//! Standard Dijkstra over the routing table with two danger-zone rules:
//!
//! - **Per-edge admissibility**: an edge whose chord crosses danger zones
//!   for more than `tolerance_m` metres is skipped outright.
//! - **Cumulative tie-break**: among equal-distance paths, the one with
//!   less accumulated danger length wins.  The accumulated value is never
//!   a hard constraint.
//!
//! The asymmetry — hard per-edge cap, soft cumulative tie-break, same
//! tolerance value — is inherited behavior, preserved deliberately; see
//! DESIGN.md before changing it.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use sr_core::{GeoPoint, NodeId};
use sr_graph::RoutingTable;

use crate::error::{RouteError, RouteResult};
use crate::zone::DangerZoneIndex;

// ── SafeRoute ─────────────────────────────────────────────────────────────────

/// The result of a successful search.
#[derive(Debug, Clone)]
pub struct SafeRoute {
    /// Nodes in visit order; first is the snapped start, last the snapped
    /// end.  Every consecutive pair is adjacent in the routing table.
    pub path: Vec<NodeId>,
    /// Total geodesic path length in kilometres.
    pub total_distance_km: f64,
    /// Danger-zone intersection accumulated along the path, in metres.
    pub danger_m: f64,
}

impl SafeRoute {
    /// Path as canonical `"lat,lon"` keys, ready for a map renderer.
    pub fn keys(&self, table: &RoutingTable) -> Vec<String> {
        self.path.iter().map(|&n| table.key(n).to_string()).collect()
    }
}

// ── Heap entry ────────────────────────────────────────────────────────────────

/// Min-heap entry ordered by tentative distance, then node id for
/// deterministic pops.  Comparisons are reversed so the std max-heap
/// behaves as a min-heap; the `f64` key needs the manual `Ord`.
struct HeapEntry {
    distance_km: f64,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance_km
            .total_cmp(&self.distance_km)
            .then_with(|| other.node.cmp(&self.node))
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Find the cheapest path from `start` to `end` whose every edge keeps its
/// danger-zone crossing within `tolerance_m` metres.
///
/// Both endpoints snap to the nearest table node first (linear Haversine
/// scan).  Per-call search state is allocated fresh and discarded on
/// return, so concurrent calls over a shared read-only table and zone
/// index are safe.
///
/// # Errors
///
/// - [`RouteError::EmptyNetwork`] when the table has no nodes.
/// - [`RouteError::NoSafeRoute`] when no admissible path reaches the end
///   node — an expected outcome, typically answered by relaxing the
///   tolerance.
pub fn find_safe_route(
    table: &RoutingTable,
    zones: &DangerZoneIndex,
    start: GeoPoint,
    end: GeoPoint,
    tolerance_m: f64,
) -> RouteResult<SafeRoute> {
    let from = table.nearest_node(start).ok_or(RouteError::EmptyNetwork)?;
    let to = table.nearest_node(end).ok_or(RouteError::EmptyNetwork)?;

    let n = table.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut danger = vec![0.0f64; n];
    let mut prev = vec![NodeId::INVALID; n];
    let mut visited = vec![false; n];

    dist[from.index()] = 0.0;
    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry { distance_km: 0.0, node: from });

    while let Some(HeapEntry { distance_km, node }) = heap.pop() {
        if visited[node.index()] {
            continue; // stale heap entry
        }
        visited[node.index()] = true;
        if node == to {
            break;
        }

        for edge in table.edges(node) {
            let crossing_m =
                zones.total_intersection_length(table.pos(node), table.pos(edge.to));
            if crossing_m > tolerance_m {
                continue; // inadmissible: this edge alone exceeds the cap
            }

            let next_dist = distance_km + edge.distance_km;
            let next_danger = danger[node.index()] + crossing_m;
            let better = next_dist < dist[edge.to.index()]
                || (next_dist == dist[edge.to.index()]
                    && next_danger < danger[edge.to.index()]);
            if better {
                dist[edge.to.index()] = next_dist;
                danger[edge.to.index()] = next_danger;
                prev[edge.to.index()] = node;
                heap.push(HeapEntry { distance_km: next_dist, node: edge.to });
            }
        }
    }

    if dist[to.index()].is_infinite() {
        return Err(RouteError::NoSafeRoute { from, to });
    }

    // Walk the predecessor chain back from the end node.
    let mut path = Vec::new();
    let mut cursor = to;
    while cursor != NodeId::INVALID {
        path.push(cursor);
        cursor = prev[cursor.index()];
    }
    path.reverse();

    Ok(SafeRoute {
        path,
        total_distance_km: dist[to.index()],
        danger_m: danger[to.index()],
    })
}
