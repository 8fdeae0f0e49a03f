//! Unit tests for sr-route.
//!
//! All tests use hand-crafted tables near the equator, where degree/metre
//! conversion is easy to reason about (1° ≈ 111.195 km at R = 6371 km).

#[cfg(test)]
mod helpers {
    use sr_core::{GeoPoint, NodeId};
    use sr_graph::{RoadNetworkBuilder, RoutingTable};

    /// A 4-node square ring, each side ≈ 1 km:
    ///
    /// ```text
    ///   D(0.009, 0) ── C(0.009, 0.009)
    ///   │                   │
    ///   A(0, 0) ────── B(0, 0.009)
    /// ```
    pub fn square_table() -> (RoutingTable, [NodeId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let bb = b.add_node(GeoPoint::new(0.0, 0.009));
        let c = b.add_node(GeoPoint::new(0.009, 0.009));
        let d = b.add_node(GeoPoint::new(0.009, 0.0));
        b.add_road(a, bb, "residential", "south", false);
        b.add_road(bb, c, "residential", "east", false);
        b.add_road(c, d, "residential", "north", false);
        b.add_road(d, a, "residential", "west", false);
        (b.build(), [a, bb, c, d])
    }

    /// A rectangle danger zone given as a `(lat, lon)` ring.
    pub fn rect_zone(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(lat_min, lon_min),
            GeoPoint::new(lat_min, lon_max),
            GeoPoint::new(lat_max, lon_max),
            GeoPoint::new(lat_max, lon_min),
        ]
    }

    /// Every consecutive path pair must be an edge in the table.
    pub fn assert_adjacent(table: &RoutingTable, path: &[NodeId]) {
        for pair in path.windows(2) {
            assert!(
                table.edges(pair[0]).iter().any(|e| e.to == pair[1]),
                "{} → {} is not an edge",
                pair[0],
                pair[1]
            );
        }
    }

    /// Textbook Dijkstra with no constraints, O(n²) scan form.  Reference
    /// for the "zero zones behaves like plain Dijkstra" property.
    pub fn plain_dijkstra(
        table: &RoutingTable,
        from: NodeId,
        to: NodeId,
    ) -> Option<(Vec<NodeId>, f64)> {
        let n = table.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev = vec![NodeId::INVALID; n];
        let mut visited = vec![false; n];
        dist[from.index()] = 0.0;

        loop {
            let mut current = None;
            let mut best = f64::INFINITY;
            for i in 0..n {
                if !visited[i] && dist[i] < best {
                    best = dist[i];
                    current = Some(NodeId(i as u32));
                }
            }
            let Some(current) = current else { break };
            visited[current.index()] = true;
            if current == to {
                break;
            }
            for edge in table.edges(current) {
                let cand = dist[current.index()] + edge.distance_km;
                if cand < dist[edge.to.index()] {
                    dist[edge.to.index()] = cand;
                    prev[edge.to.index()] = current;
                }
            }
        }

        if dist[to.index()].is_infinite() {
            return None;
        }
        let mut path = Vec::new();
        let mut cursor = to;
        while cursor != NodeId::INVALID {
            path.push(cursor);
            cursor = prev[cursor.index()];
        }
        path.reverse();
        Some((path, dist[to.index()]))
    }
}

// ── Planar geometry ───────────────────────────────────────────────────────────

#[cfg(test)]
mod geometry {
    use crate::geometry::{chord_clip, point_in_ring, PlanarPoint};

    fn unit_square() -> Vec<PlanarPoint> {
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
    }

    /// U-shaped (concave) ring: a bottom slab with two vertical arms.
    fn u_ring() -> Vec<PlanarPoint> {
        vec![
            (0.0, 0.0),
            (5.0, 0.0),
            (5.0, 3.0),
            (4.0, 3.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
            (0.0, 0.0),
        ]
    }

    #[test]
    fn point_in_square() {
        let ring = unit_square();
        assert!(point_in_ring((0.5, 0.5), &ring));
        assert!(!point_in_ring((1.5, 0.5), &ring));
        assert!(!point_in_ring((-0.1, 0.5), &ring));
        assert!(!point_in_ring((0.5, -2.0), &ring));
    }

    #[test]
    fn point_in_concave_notch() {
        let ring = u_ring();
        assert!(point_in_ring((0.5, 2.0), &ring)); // left arm
        assert!(point_in_ring((2.5, 0.5), &ring)); // bottom slab
        assert!(!point_in_ring((2.5, 2.0), &ring)); // inside the notch
    }

    #[test]
    fn chord_through_square() {
        let ring = unit_square();
        let (t0, t1) = chord_clip((-1.0, 0.5), (2.0, 0.5), &ring).unwrap();
        assert!((t0 - 1.0 / 3.0).abs() < 1e-9, "t0 = {t0}");
        assert!((t1 - 2.0 / 3.0).abs() < 1e-9, "t1 = {t1}");
    }

    #[test]
    fn chord_fully_inside() {
        let ring = unit_square();
        let (t0, t1) = chord_clip((0.2, 0.5), (0.8, 0.5), &ring).unwrap();
        assert_eq!((t0, t1), (0.0, 1.0));
    }

    #[test]
    fn chord_half_inside() {
        let ring = unit_square();
        let (t0, t1) = chord_clip((0.5, 0.5), (1.5, 0.5), &ring).unwrap();
        assert_eq!(t0, 0.0);
        assert!((t1 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn chord_missing_clips_to_none() {
        let ring = unit_square();
        assert!(chord_clip((-1.0, 2.0), (2.0, 2.0), &ring).is_none());
    }

    #[test]
    fn multi_piece_crossing_clips_to_none() {
        // Crosses both arms of the U: two separate inside pieces, which
        // the clip deliberately refuses to measure.
        let ring = u_ring();
        assert!(chord_clip((-1.0, 2.0), (6.0, 2.0), &ring).is_none());
    }
}

// ── Danger zones ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod zones {
    use sr_core::GeoPoint;

    use super::helpers::{rect_zone, square_table};
    use crate::{DangerZoneIndex, RouteError};

    #[test]
    fn register_rejects_degenerate_rings() {
        let (table, _) = square_table();
        let mut zones = DangerZoneIndex::new();

        let two = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert!(matches!(
            zones.register(&two, &table),
            Err(RouteError::InvalidPolygon { vertices: 2 })
        ));

        // Explicitly closed 2-vertex "ring" is still degenerate.
        let closed = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 0.0),
        ];
        assert!(matches!(
            zones.register(&closed, &table),
            Err(RouteError::InvalidPolygon { vertices: 2 })
        ));
    }

    #[test]
    fn register_closes_the_ring() {
        let (table, _) = square_table();
        let mut zones = DangerZoneIndex::new();
        let zone = zones
            .register(&rect_zone(-0.001, 0.001, 0.003, 0.006), &table)
            .unwrap();

        let ring = zones.ring(zone);
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
        assert_eq!(zones.zone_count(), 1);
    }

    #[test]
    fn contained_nodes_are_strictly_inside() {
        let (table, [a, ..]) = square_table();
        let mut zones = DangerZoneIndex::new();
        // Small box around node A only.
        let zone = zones
            .register(&rect_zone(-0.001, 0.001, -0.001, 0.001), &table)
            .unwrap();
        assert_eq!(zones.contained_nodes(zone), &[a]);
    }

    #[test]
    fn chord_crossing_length() {
        let (table, _) = square_table();
        let mut zones = DangerZoneIndex::new();
        // Box spanning lon 0.003..0.006 across the A–B chord (lat 0).
        let zone = zones
            .register(&rect_zone(-0.001, 0.001, 0.003, 0.006), &table)
            .unwrap();

        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.009);
        let len = zones.intersection_length(a, b, zone);
        // 0.003° of longitude at the equator ≈ 333.6 m.
        assert!((len - 333.6).abs() < 1.0, "got {len}");
        // Symmetric in chord direction.
        assert!((zones.intersection_length(b, a, zone) - len).abs() < 1e-6);
    }

    #[test]
    fn disjoint_chord_measures_zero() {
        let (table, _) = square_table();
        let mut zones = DangerZoneIndex::new();
        let zone = zones
            .register(&rect_zone(-0.001, 0.001, 0.003, 0.006), &table)
            .unwrap();

        // The B–C edge runs at lon 0.009, east of the box.
        let b = GeoPoint::new(0.0, 0.009);
        let c = GeoPoint::new(0.009, 0.009);
        assert_eq!(zones.intersection_length(b, c, zone), 0.0);
    }

    #[test]
    fn total_sums_over_zones() {
        let (table, _) = square_table();
        let mut zones = DangerZoneIndex::new();
        zones
            .register(&rect_zone(-0.001, 0.001, 0.001, 0.002), &table)
            .unwrap();
        zones
            .register(&rect_zone(-0.001, 0.001, 0.005, 0.007), &table)
            .unwrap();

        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.009);
        // 0.001° + 0.002° of longitude ≈ 111.2 + 222.4 m.
        let total = zones.total_intersection_length(a, b);
        assert!((total - 333.6).abs() < 2.0, "got {total}");
    }

    #[test]
    fn empty_index_measures_zero() {
        let zones = DangerZoneIndex::new();
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.009);
        assert_eq!(zones.total_intersection_length(a, b), 0.0);
    }
}

// ── Constrained search ────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use sr_core::GeoPoint;
    use sr_graph::RoadNetworkBuilder;

    use super::helpers::{assert_adjacent, plain_dijkstra, rect_zone, square_table};
    use crate::{find_safe_route, DangerZoneIndex, RouteError};

    #[test]
    fn zero_zones_matches_plain_dijkstra() {
        let (table, [a, _, c, _]) = square_table();
        let zones = DangerZoneIndex::new();

        let route = find_safe_route(&table, &zones, table.pos(a), table.pos(c), 0.0).unwrap();
        let (ref_path, ref_dist) = plain_dijkstra(&table, a, c).unwrap();

        assert_eq!(route.path, ref_path);
        assert!((route.total_distance_km - ref_dist).abs() < 1e-12);
        assert_eq!(route.danger_m, 0.0);
        assert_adjacent(&table, &route.path);
    }

    #[test]
    fn blocked_edge_routes_around_the_square() {
        let (table, [a, b, c, d]) = square_table();
        let mut zones = DangerZoneIndex::new();
        // Zone across the middle of the A–B edge.
        zones
            .register(&rect_zone(-0.001, 0.001, 0.003, 0.006), &table)
            .unwrap();

        // Start/end snap to A and B; zero tolerance forbids the direct edge.
        let route = find_safe_route(
            &table,
            &zones,
            GeoPoint::new(0.0001, -0.0002),
            GeoPoint::new(0.0001, 0.0093),
            0.0,
        )
        .unwrap();

        assert_eq!(route.path, vec![a, d, c, b]);
        assert!((route.total_distance_km - 3.0).abs() < 0.05, "got {}", route.total_distance_km);
        assert_eq!(route.danger_m, 0.0);
        assert_adjacent(&table, &route.path);
    }

    #[test]
    fn crossing_within_tolerance_keeps_direct_edge() {
        let (table, [a, b, ..]) = square_table();
        let mut zones = DangerZoneIndex::new();
        // ~10 m sliver across A–B.
        zones
            .register(&rect_zone(-0.001, 0.001, 0.004, 0.00409), &table)
            .unwrap();

        let route =
            find_safe_route(&table, &zones, table.pos(a), table.pos(b), 50.0).unwrap();

        assert_eq!(route.path, vec![a, b]);
        assert!((route.total_distance_km - 1.0).abs() < 0.01);
        assert!((route.danger_m - 10.0).abs() < 2.0, "got {}", route.danger_m);
    }

    #[test]
    fn fully_blocked_single_edge_is_no_route() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(GeoPoint::new(0.0, 0.0));
        let b = builder.add_node(GeoPoint::new(0.0, 0.009));
        builder.add_road(a, b, "residential", "unnamed", false);
        let table = builder.build();

        let mut zones = DangerZoneIndex::new();
        zones
            .register(&rect_zone(-0.001, 0.001, 0.003, 0.006), &table)
            .unwrap();

        let err =
            find_safe_route(&table, &zones, table.pos(a), table.pos(b), 0.0).unwrap_err();
        assert!(matches!(err, RouteError::NoSafeRoute { from, to } if from == a && to == b));
    }

    #[test]
    fn disconnected_components_are_no_route() {
        let mut builder = RoadNetworkBuilder::new();
        let a = builder.add_node(GeoPoint::new(0.0, 0.0));
        let b = builder.add_node(GeoPoint::new(0.5, 0.5));
        let table = builder.build();
        let zones = DangerZoneIndex::new();

        let err =
            find_safe_route(&table, &zones, table.pos(a), table.pos(b), 100.0).unwrap_err();
        assert!(matches!(err, RouteError::NoSafeRoute { .. }));
    }

    #[test]
    fn empty_table_is_an_error() {
        let table = RoadNetworkBuilder::new().build();
        let zones = DangerZoneIndex::new();
        let err = find_safe_route(
            &table,
            &zones,
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::EmptyNetwork));
    }

    #[test]
    fn same_snapped_endpoint_is_trivial() {
        let (table, [a, ..]) = square_table();
        let zones = DangerZoneIndex::new();
        let route = find_safe_route(&table, &zones, table.pos(a), table.pos(a), 0.0).unwrap();
        assert_eq!(route.path, vec![a]);
        assert_eq!(route.total_distance_km, 0.0);
        assert_eq!(route.danger_m, 0.0);
    }

    #[test]
    fn equal_distance_tie_breaks_on_less_danger() {
        // Diamond with hand-set equal edge weights:
        //
        //        M1 (crossed by a zone)
        //       /  \
        //      S    E        S→M1→E and S→M2→E both cost exactly 2.0 km
        //       \  /
        //        M2
        let mut builder = RoadNetworkBuilder::new();
        let s = builder.add_node(GeoPoint::new(0.0, 0.0));
        let m1 = builder.add_node(GeoPoint::new(0.002, 0.0045));
        let m2 = builder.add_node(GeoPoint::new(-0.002, 0.0045));
        let e = builder.add_node(GeoPoint::new(0.0, 0.009));
        for (x, y) in [(s, m1), (m1, e), (s, m2), (m2, e)] {
            builder.add_directed_edge(x, y, 1.0, "residential", "unnamed", false);
            builder.add_directed_edge(y, x, 1.0, "residential", "unnamed", false);
        }
        let table = builder.build();

        let mut zones = DangerZoneIndex::new();
        // Small box on the S–M1 chord only.
        zones
            .register(&rect_zone(0.0005, 0.0015, 0.002, 0.0025), &table)
            .unwrap();

        let route =
            find_safe_route(&table, &zones, table.pos(s), table.pos(e), 1000.0).unwrap();

        assert_eq!(route.path, vec![s, m2, e]);
        assert_eq!(route.total_distance_km, 2.0);
        assert_eq!(route.danger_m, 0.0);
    }

    #[test]
    fn route_keys_render_canonical_coordinates() {
        let (table, [a, b, ..]) = square_table();
        let zones = DangerZoneIndex::new();
        let route = find_safe_route(&table, &zones, table.pos(a), table.pos(b), 0.0).unwrap();
        assert_eq!(route.keys(&table), vec!["0,0".to_string(), "0,0.009".to_string()]);
    }
}
