//! Danger-zone registry and chord-intersection queries.
//!
//! Zones are closed polygons stored in planar `(lon, lat)` order.  An
//! R-tree over zone bounding boxes prunes zones whose bbox a chord cannot
//! touch; the exact clip still runs per surviving candidate, so pruning
//! never changes a result.

use rstar::{RTree, RTreeObject, AABB};

use sr_core::{GeoPoint, NodeId, ZoneId};
use sr_graph::RoutingTable;

use crate::error::{RouteError, RouteResult};
use crate::geometry::{chord_clip, lerp, point_in_ring, PlanarPoint};

// ── R-tree zone entry ─────────────────────────────────────────────────────────

/// Bounding box of one zone in the R-tree.
struct ZoneEntry {
    bbox: AABB<[f64; 2]>,
    id: ZoneId,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bbox
    }
}

// ── DangerZone ────────────────────────────────────────────────────────────────

struct DangerZone {
    /// Closed ring (first vertex repeated at the end), `(lon, lat)`.
    ring: Vec<PlanarPoint>,
    /// Routing-table nodes strictly inside the ring, computed eagerly at
    /// registration.  Inspection aid only — the search never reads this.
    contained: Vec<NodeId>,
}

// ── DangerZoneIndex ───────────────────────────────────────────────────────────

/// Registry of forbidden polygons with chord-intersection queries.
///
/// Register all zones before issuing searches; registration and search
/// must not overlap (the index is read-only during a search).
pub struct DangerZoneIndex {
    zones: Vec<DangerZone>,
    bbox_idx: RTree<ZoneEntry>,
}

impl DangerZoneIndex {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            bbox_idx: RTree::new(),
        }
    }

    /// Register a polygon given as an ordered `(lat, lon)` vertex ring.
    /// The ring is closed implicitly; a repeated first/last vertex is
    /// tolerated.
    ///
    /// Rejects rings with fewer than 3 distinct vertices.  Self-
    /// intersecting rings are *not* detected; behavior on them is
    /// undefined.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidPolygon`] on a degenerate ring.
    pub fn register(&mut self, vertices: &[GeoPoint], table: &RoutingTable) -> RouteResult<ZoneId> {
        let mut ring: Vec<PlanarPoint> = vertices.iter().map(|v| (v.lon, v.lat)).collect();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop(); // explicit closure; we re-close below
        }
        if ring.len() < 3 {
            return Err(RouteError::InvalidPolygon { vertices: ring.len() });
        }
        ring.push(ring[0]);

        let contained: Vec<NodeId> = table
            .node_ids()
            .filter(|&node| {
                let p = table.pos(node);
                point_in_ring((p.lon, p.lat), &ring)
            })
            .collect();

        let id = ZoneId(self.zones.len() as u32);
        self.bbox_idx.insert(ZoneEntry {
            bbox: ring_bbox(&ring),
            id,
        });
        self.zones.push(DangerZone { ring, contained });
        Ok(id)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Geodesic length, in metres, of the straight `start → end` chord's
    /// overlap with `zone`.
    ///
    /// The chord is clipped in the planar `(lon, lat)` plane; the clipped
    /// piece is then measured with the Haversine formula.  Overlaps that
    /// are not a single sub-segment (multi-piece crossings of a concave
    /// ring, single-point touches) measure 0 — an inherited limitation,
    /// see `geometry` module docs.
    pub fn intersection_length(&self, start: GeoPoint, end: GeoPoint, zone: ZoneId) -> f64 {
        let ring = &self.zones[zone.index()].ring;
        let a = (start.lon, start.lat);
        let b = (end.lon, end.lat);
        match chord_clip(a, b, ring) {
            Some((t0, t1)) => {
                let (x0, y0) = lerp(a, b, t0);
                let (x1, y1) = lerp(a, b, t1);
                GeoPoint::new(y0, x0).distance_m(GeoPoint::new(y1, x1))
            }
            None => 0.0,
        }
    }

    /// Sum of [`intersection_length`](Self::intersection_length) over all
    /// registered zones.
    pub fn total_intersection_length(&self, start: GeoPoint, end: GeoPoint) -> f64 {
        if self.zones.is_empty() {
            return 0.0;
        }
        let chord_bbox = AABB::from_corners(
            [start.lon.min(end.lon), start.lat.min(end.lat)],
            [start.lon.max(end.lon), start.lat.max(end.lat)],
        );
        self.bbox_idx
            .locate_in_envelope_intersecting(&chord_bbox)
            .map(|entry| self.intersection_length(start, end, entry.id))
            .sum()
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// The closed ring of `zone` as `(lat, lon)` coordinates, for map
    /// rendering collaborators.
    pub fn ring(&self, zone: ZoneId) -> Vec<GeoPoint> {
        self.zones[zone.index()]
            .ring
            .iter()
            .map(|&(lon, lat)| GeoPoint::new(lat, lon))
            .collect()
    }

    /// Routing-table nodes strictly inside `zone`.  Inspection aid only;
    /// routing decisions never consult this set.
    pub fn contained_nodes(&self, zone: ZoneId) -> &[NodeId] {
        &self.zones[zone.index()].contained
    }
}

impl Default for DangerZoneIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn ring_bbox(ring: &[PlanarPoint]) -> AABB<[f64; 2]> {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for &(x, y) in ring {
        min[0] = min[0].min(x);
        min[1] = min[1].min(y);
        max[0] = max[0].max(x);
        max[1] = max[1].max(y);
    }
    AABB::from_corners(min, max)
}
