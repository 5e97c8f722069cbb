//! Tolerant polygon primitives.
//!
//! These operate on implicitly-closed rings (the first point is not repeated
//! at the end). The point containment test deliberately classifies points on
//! the boundary as inside: two rectangles sharing an edge both own that edge,
//! which the rectangle merger's adjacency counting relies on.

use crate::transform::Aabb2;

/// Guard added to the edge-crossing denominator to avoid division by zero on
/// horizontal edges.
const EDGE_GUARD: f64 = 1e-12;

/// Polygon area by the shoelace formula. Always non-negative; invariant under
/// vertex order reversal and cyclic rotation of the ring.
pub fn ring_area(ring: &[(f64, f64)]) -> f64 {
    let n = ring.len();
    let mut area = 0.0;
    for i in 0..n {
        let (x1, y1) = ring[i];
        let (x2, y2) = ring[(i + 1) % n];
        area += x1 * y2 - x2 * y1;
    }
    area.abs() / 2.0
}

/// Axis-aligned bounding box of a ring.
pub fn ring_bbox(ring: &[(f64, f64)]) -> Aabb2 {
    Aabb2::from_ring(ring)
}

/// Ray-casting point-in-polygon test with tolerance.
///
/// Returns true if the point coincides with a vertex within `tol`, lies
/// within `tol` of an edge crossed by the horizontal ray, or is enclosed by
/// the usual parity count of ray/edge crossings.
pub fn point_in_ring(x: f64, y: f64, ring: &[(f64, f64)], tol: f64) -> bool {
    let n = ring.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let (mut p1x, mut p1y) = ring[0];
    for i in 1..=n {
        let (p2x, p2y) = ring[i % n];
        if (x - p1x).abs() < tol && (y - p1y).abs() < tol {
            return true;
        }
        if (p1y > y) != (p2y > y) {
            let x_intersect = (y - p1y) * (p2x - p1x) / (p2y - p1y + EDGE_GUARD) + p1x;
            if (x - x_intersect).abs() < tol {
                return true;
            }
            if x < x_intersect - tol {
                inside = !inside;
            }
        }
        p1x = p2x;
        p1y = p2y;
    }
    inside
}
