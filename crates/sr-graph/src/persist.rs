//! Flat-JSON persistence of the routing table.
//!
//! The on-disk layout is a single JSON object mapping each node's
//! canonical `"lat,lon"` key to an array of edge objects:
//!
//! ```json
//! {
//!   "21.14,79.08": [
//!     {
//!       "destination": "21.15,79.08",
//!       "next_hop": "21.15,79.08",
//!       "distance": 1.112,
//!       "road_type": "residential",
//!       "road_name": "unnamed",
//!       "oneway": false
//!     }
//!   ]
//! }
//! ```
//!
//! `next_hop` always equals `destination` — the table has no multi-hop
//! indirection — but existing consumers expect the field, so it is always
//! written.  Edge-object field order and presence must not change.  Node
//! keys serialize in sorted order; the object is semantically unordered.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use sr_core::GeoPoint;

use crate::error::GraphResult;
use crate::network::{RoadNetworkBuilder, RoutingTable};

/// One serialized adjacency entry.  Field order is part of the format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub destination: String,
    pub next_hop: String,
    pub distance: f64,
    pub road_type: String,
    pub road_name: String,
    pub oneway: bool,
}

/// Serialize a routing table to the flat node→edges JSON object.
pub fn to_json(table: &RoutingTable) -> GraphResult<String> {
    let mut map: BTreeMap<&str, Vec<EdgeRecord>> = BTreeMap::new();
    for node in table.node_ids() {
        let records = table
            .edges(node)
            .iter()
            .map(|edge| {
                let destination = table.key(edge.to).to_string();
                EdgeRecord {
                    next_hop: destination.clone(),
                    destination,
                    distance: edge.distance_km,
                    road_type: edge.road_type.clone(),
                    road_name: edge.road_name.clone(),
                    oneway: edge.oneway,
                }
            })
            .collect();
        map.insert(table.key(node), records);
    }
    Ok(serde_json::to_string_pretty(&map)?)
}

/// Parse a routing table from the flat node→edges JSON object.
///
/// Edge distances are taken verbatim from the file (they were Haversine at
/// build time); node positions are recovered by parsing the keys.
///
/// # Errors
///
/// [`GraphError::Json`](crate::GraphError::Json) on malformed JSON,
/// [`GraphError::Coord`](crate::GraphError::Coord) on a malformed node or
/// destination key.
pub fn from_json(body: &str) -> GraphResult<RoutingTable> {
    let map: BTreeMap<String, Vec<EdgeRecord>> = serde_json::from_str(body)?;

    let mut builder = RoadNetworkBuilder::with_capacity(map.len());
    // Intern every node key up front so nodes without outgoing edges
    // survive the round trip at stable ids.
    for key in map.keys() {
        builder.add_node(GeoPoint::parse_key(key)?);
    }
    for (key, records) in &map {
        let from = builder.add_node(GeoPoint::parse_key(key)?);
        for record in records {
            let to = builder.add_node(GeoPoint::parse_key(&record.destination)?);
            builder.add_directed_edge(
                from,
                to,
                record.distance,
                &record.road_type,
                &record.road_name,
                record.oneway,
            );
        }
    }
    Ok(builder.build())
}

/// Write the table to `path` as JSON.
pub fn save(table: &RoutingTable, path: &Path) -> GraphResult<()> {
    fs::write(path, to_json(table)?)?;
    Ok(())
}

/// Read a table previously written by [`save`].
pub fn load(path: &Path) -> GraphResult<RoutingTable> {
    from_json(&fs::read_to_string(path)?)
}
