//! Routing table representation and builder.
//!
//! # Data layout
//!
//! Nodes are interned once at construction: each distinct canonical
//! `"lat,lon"` key gets a dense [`NodeId`], and all per-node data lives in
//! parallel `Vec`s indexed by that id (`node_key`, `node_pos`,
//! `adjacency`).  The search never parses or formats coordinate strings;
//! it works on ids and positions.
//!
//! # Edge symmetry
//!
//! Road segments are always stored in **both** directions.  The `oneway`
//! flag is carried as metadata for consumers of the persisted table but
//! never suppresses the reverse direction — inherited behavior that
//! existing table consumers depend on.

use std::collections::HashMap;

use sr_core::{GeoPoint, NodeId};

// ── Edge ──────────────────────────────────────────────────────────────────────

/// Directed adjacency record.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Destination node.
    pub to: NodeId,
    /// Geodesic (Haversine) segment length in kilometres.
    pub distance_km: f64,
    /// OSM `highway` class, e.g. `"residential"`.
    pub road_type: String,
    /// Road name; `"unnamed"` when the source data has none.
    pub road_name: String,
    /// One-way flag from the source data.  Metadata only; see module docs.
    pub oneway: bool,
}

// ── RoutingTable ──────────────────────────────────────────────────────────────

/// The full adjacency structure of a road network.  Built once by
/// [`RoadNetworkBuilder`] and treated as read-only input to the search.
#[derive(Debug)]
pub struct RoutingTable {
    /// Canonical `"lat,lon"` key of each node.  Indexed by `NodeId`.
    node_key: Vec<String>,
    /// Position of each node.  Indexed by `NodeId`.
    node_pos: Vec<GeoPoint>,
    /// Reverse lookup from canonical key to id.
    key_to_id: HashMap<String, NodeId>,
    /// Outgoing edges of each node.  Indexed by `NodeId`.
    adjacency: Vec<Vec<Edge>>,
}

impl RoutingTable {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_key.len()
    }

    /// Total number of directed adjacency entries.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.node_key.is_empty()
    }

    // ── Node access ───────────────────────────────────────────────────────

    /// All node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_key.len()).map(|i| NodeId(i as u32))
    }

    /// Canonical key of `node`.
    pub fn key(&self, node: NodeId) -> &str {
        &self.node_key[node.index()]
    }

    /// Position of `node`.
    #[inline]
    pub fn pos(&self, node: NodeId) -> GeoPoint {
        self.node_pos[node.index()]
    }

    /// Look up a node by its canonical key.
    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.key_to_id.get(key).copied()
    }

    /// Outgoing edges of `node`.
    #[inline]
    pub fn edges(&self, node: NodeId) -> &[Edge] {
        &self.adjacency[node.index()]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest node to `pos` by Haversine distance, via a linear scan over
    /// all nodes.  Equidistant candidates resolve to the lowest `NodeId`
    /// (ingestion order).  `None` only on an empty table.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for id in self.node_ids() {
            let d = pos.distance_km(self.pos(id));
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoutingTable`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sr_core::GeoPoint;
/// use sr_graph::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(21.14, 79.08));
/// let c = b.add_node(GeoPoint::new(21.15, 79.08));
/// b.add_road(a, c, "residential", "unnamed", false);
/// let table = b.build();
/// assert_eq!(table.node_count(), 2);
/// assert_eq!(table.edge_count(), 2); // stored in both directions
/// ```
pub struct RoadNetworkBuilder {
    node_key: Vec<String>,
    node_pos: Vec<GeoPoint>,
    key_to_id: HashMap<String, NodeId>,
    adjacency: Vec<Vec<Edge>>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            node_key: Vec::new(),
            node_pos: Vec::new(),
            key_to_id: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes to reduce
    /// reallocations when bulk-loading.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            node_key: Vec::with_capacity(nodes),
            node_pos: Vec::with_capacity(nodes),
            key_to_id: HashMap::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
        }
    }

    /// Intern a node by its canonical key.  Returns the existing id when a
    /// node with the same key was added before — node identity is exact
    /// key equality, never proximity.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let key = pos.key();
        if let Some(&id) = self.key_to_id.get(&key) {
            return id;
        }
        let id = NodeId(self.node_key.len() as u32);
        self.key_to_id.insert(key.clone(), id);
        self.node_key.push(key);
        self.node_pos.push(pos);
        self.adjacency.push(Vec::new());
        id
    }

    /// Add a single directed edge with an explicit distance.  Used by
    /// persistence reload, where the distance is already stored; fresh
    /// construction should go through [`add_road`](Self::add_road).
    ///
    /// A second edge to the same destination *replaces* the first
    /// (last-writer-wins), so at most one edge exists per `(from, to)`
    /// pair — matching the undirected-graph semantics of the source data.
    pub fn add_directed_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        distance_km: f64,
        road_type: &str,
        road_name: &str,
        oneway: bool,
    ) {
        let edge = Edge {
            to,
            distance_km,
            road_type: road_type.to_string(),
            road_name: road_name.to_string(),
            oneway,
        };
        let list = &mut self.adjacency[from.index()];
        match list.iter_mut().find(|e| e.to == to) {
            Some(slot) => *slot = edge,
            None => list.push(edge),
        }
    }

    /// Add a road segment between `a` and `b` in **both** directions.
    ///
    /// The distance is recomputed from the node positions (Haversine, km)
    /// so that every stored edge satisfies the distance invariant.
    /// `oneway` is stored as metadata and does not suppress the reverse
    /// direction.
    pub fn add_road(
        &mut self,
        a: NodeId,
        b: NodeId,
        road_type: &str,
        road_name: &str,
        oneway: bool,
    ) {
        let d = self.node_pos[a.index()].distance_km(self.node_pos[b.index()]);
        self.add_directed_edge(a, b, d, road_type, road_name, oneway);
        self.add_directed_edge(b, a, d, road_type, road_name, oneway);
    }

    pub fn node_count(&self) -> usize {
        self.node_key.len()
    }

    /// Consume the builder and produce a [`RoutingTable`].
    pub fn build(self) -> RoutingTable {
        RoutingTable {
            node_key: self.node_key,
            node_pos: self.node_pos,
            key_to_id: self.key_to_id,
            adjacency: self.adjacency,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
