//! Overpass-style raw element ingestion.
//!
//! The network fetch itself is an external collaborator; this module
//! consumes a response body (or an already-deserialized element list) and
//! builds a [`RoutingTable`] from it.
//!
//! # Error policy
//!
//! Ways without a `highway` tag contribute nothing.  A way segment whose
//! node id does not resolve in the node index is skipped silently —
//! partial data degrades the graph instead of aborting the build.  Element
//! order does not matter beyond "all elements arrive in one batch".

use std::collections::HashMap;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use sr_core::GeoPoint;

use crate::error::GraphResult;
use crate::network::{RoadNetworkBuilder, RoutingTable};

// ── Raw elements ──────────────────────────────────────────────────────────────

/// One element of an Overpass `elements` array.  Unknown fields (element
/// ids on ways, `version`, …) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        /// Ordered OSM node ids along the way.
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
}

#[derive(Deserialize)]
struct OverpassResponse {
    elements: Vec<RawElement>,
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Parse a full Overpass API response body and build the routing table.
///
/// # Errors
///
/// [`GraphError::Json`](crate::GraphError::Json) when the body is not a
/// valid Overpass response.
pub fn from_json(body: &str) -> GraphResult<RoutingTable> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(build_from_elements(&response.elements))
}

/// Build a routing table from raw node/way elements.
///
/// Every consecutive node pair of a `highway`-tagged way becomes a
/// bidirectional edge whose distance is the Haversine distance between the
/// resolved positions.  `name` defaults to `"unnamed"`; `oneway` is true
/// only for the literal tag value `"yes"`.
pub fn build_from_elements(elements: &[RawElement]) -> RoutingTable {
    // Pass 1: index node positions by OSM id.
    let mut positions: FxHashMap<i64, GeoPoint> = FxHashMap::default();
    for element in elements {
        if let RawElement::Node { id, lat, lon } = element {
            positions.insert(*id, GeoPoint::new(*lat, *lon));
        }
    }

    // Pass 2: expand highway ways into edges.
    let mut builder = RoadNetworkBuilder::with_capacity(positions.len());
    for element in elements {
        let RawElement::Way { nodes, tags } = element else {
            continue;
        };
        let Some(road_type) = tags.get("highway") else {
            continue;
        };
        let road_name = tags.get("name").map(String::as_str).unwrap_or("unnamed");
        let oneway = tags.get("oneway").is_some_and(|v| v == "yes");

        for pair in nodes.windows(2) {
            let (Some(&p1), Some(&p2)) = (positions.get(&pair[0]), positions.get(&pair[1]))
            else {
                // Unresolvable node id: drop this segment only.
                continue;
            };
            let a = builder.add_node(p1);
            let b = builder.add_node(p2);
            builder.add_road(a, b, road_type, road_name, oneway);
        }
    }
    builder.build()
}
