//! Planar 2-D polygon predicates for danger zones.
//!
//! All operations work on `(x, y) = (lon, lat)` degree coordinates and
//! treat them as a flat plane.  The precision loss from ignoring curvature
//! inside a polygon is accepted for city-scale zones.
//!
//! # Known limitation
//!
//! [`chord_clip`] only reports an interval when the chord/ring overlap is
//! a single sub-segment.  A chord that enters and leaves a non-convex ring
//! more than once, or one that merely grazes a vertex, clips to *nothing*.
//! Routing results depend on this exact behavior; revisit DESIGN.md before
//! changing it.

/// `(lon, lat)` in degrees.
pub(crate) type PlanarPoint = (f64, f64);

/// Tolerance for merging chord parameters.  1e-9 degrees is well under a
/// millimetre on the ground.
const EPS: f64 = 1e-9;

/// Even-odd crossing test.  `ring` must be closed (first vertex repeated
/// at the end).  Points exactly on the boundary classify to either side
/// depending on rounding; zone containment accepts that.
pub(crate) fn point_in_ring(p: PlanarPoint, ring: &[PlanarPoint]) -> bool {
    let (px, py) = p;
    let mut inside = false;
    for edge in ring.windows(2) {
        let ((x1, y1), (x2, y2)) = (edge[0], edge[1]);
        // Count edges straddling the horizontal line through p, crossing
        // to the right of it.
        if (y1 > py) != (y2 > py) {
            let x_cross = x1 + (py - y1) / (y2 - y1) * (x2 - x1);
            if px < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Clip the chord `start → end` against `ring`.
///
/// Returns the parameter interval `(t0, t1)` (0 ≤ t0 < t1 ≤ 1) of the
/// single maximal sub-segment of the chord inside the ring, or `None` when
/// the chord misses the ring, only touches it, or crosses it in more than
/// one piece (see module docs).
pub(crate) fn chord_clip(
    start: PlanarPoint,
    end: PlanarPoint,
    ring: &[PlanarPoint],
) -> Option<(f64, f64)> {
    // Split the chord at every boundary crossing, then classify each piece
    // by its midpoint.
    let mut cuts = vec![0.0, 1.0];
    for edge in ring.windows(2) {
        if let Some(t) = crossing_param(start, end, edge[0], edge[1]) {
            cuts.push(t);
        }
    }
    cuts.sort_by(f64::total_cmp);
    cuts.dedup_by(|a, b| (*a - *b).abs() <= EPS);

    let mut intervals: Vec<(f64, f64)> = Vec::new();
    for pair in cuts.windows(2) {
        let (t0, t1) = (pair[0], pair[1]);
        if t1 - t0 <= EPS {
            continue;
        }
        let mid = lerp(start, end, 0.5 * (t0 + t1));
        if point_in_ring(mid, ring) {
            match intervals.last_mut() {
                // Re-join pieces split by a vertex-grazing cut.
                Some(last) if (last.1 - t0).abs() <= EPS => last.1 = t1,
                _ => intervals.push((t0, t1)),
            }
        }
    }

    match intervals.as_slice() {
        [single] => Some(*single),
        // Empty or multi-segment overlap: no measurable length.
        _ => None,
    }
}

/// Point at parameter `t` along `a → b`.
pub(crate) fn lerp(a: PlanarPoint, b: PlanarPoint, t: f64) -> PlanarPoint {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

/// Parameter `t` along `p → q` where it properly crosses the segment
/// `a → b`, if it does.  Parallel segments (including colinear overlap)
/// yield `None`.
fn crossing_param(p: PlanarPoint, q: PlanarPoint, a: PlanarPoint, b: PlanarPoint) -> Option<f64> {
    let r = (q.0 - p.0, q.1 - p.1);
    let s = (b.0 - a.0, b.1 - a.1);
    let denom = cross(r, s);
    if denom.abs() <= f64::EPSILON {
        return None;
    }
    let ap = (a.0 - p.0, a.1 - p.1);
    let t = cross(ap, s) / denom;
    let u = cross(ap, r) / denom;
    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then_some(t)
}

#[inline]
fn cross(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.1 - a.1 * b.0
}
