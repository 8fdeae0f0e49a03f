//! quickstart — smallest end-to-end example for the safe-route toolkit.
//!
//! Ingests a toy Overpass response (a 1 km × 1 km square ring of road),
//! persists the routing table, registers a danger zone over one side of
//! the square, and routes around it.  Swap `TOY_OVERPASS` for a real
//! Overpass API response body to run at city scale.

use std::path::Path;

use anyhow::Result;

use sr_core::GeoPoint;
use sr_graph::{overpass, persist};
use sr_route::{find_safe_route, DangerZoneIndex};

// ── Constants ─────────────────────────────────────────────────────────────────

const TABLE_PATH: &str = "routing-table.json";
const TOLERANCE_M: f64 = 0.0;

// Square ring at the equator: four nodes ≈ 1 km apart, one closed way.
const TOY_OVERPASS: &str = r#"{
    "elements": [
        {"type": "node", "id": 1, "lat": 0.0,   "lon": 0.0},
        {"type": "node", "id": 2, "lat": 0.0,   "lon": 0.009},
        {"type": "node", "id": 3, "lat": 0.009, "lon": 0.009},
        {"type": "node", "id": 4, "lat": 0.009, "lon": 0.0},
        {"type": "way", "id": 10, "nodes": [1, 2, 3, 4, 1],
         "tags": {"highway": "residential", "name": "Ring Road"}}
    ]
}"#;

fn main() -> Result<()> {
    // Build the routing table from raw elements and persist it.
    let table = overpass::from_json(TOY_OVERPASS)?;
    println!(
        "routing table: {} nodes, {} directed edges",
        table.node_count(),
        table.edge_count()
    );
    persist::save(&table, Path::new(TABLE_PATH))?;
    println!("saved to {TABLE_PATH}");

    // A danger zone across the southern side of the square.
    let mut zones = DangerZoneIndex::new();
    let zone = zones.register(
        &[
            GeoPoint::new(-0.001, 0.003),
            GeoPoint::new(-0.001, 0.006),
            GeoPoint::new(0.001, 0.006),
            GeoPoint::new(0.001, 0.003),
        ],
        &table,
    )?;
    println!(
        "registered zone {zone} ({} table nodes inside)",
        zones.contained_nodes(zone).len()
    );

    // Route between the two southern corners; the direct edge crosses the
    // zone, so the search goes the long way around.
    let route = find_safe_route(
        &table,
        &zones,
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 0.009),
        TOLERANCE_M,
    )?;
    println!(
        "route: {:.3} km, {:.1} m inside danger zones",
        route.total_distance_km, route.danger_m
    );
    for key in route.keys(&table) {
        println!("  {key}");
    }

    Ok(())
}
