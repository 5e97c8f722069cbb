//! Axis-aligned bounding boxes and frame rotation.
//!
//! All overlap and adjacency logic operates in an axis-aligned working frame.
//! [`rotate_ring`] and [`rotate_point`] move coordinates between the original
//! simulation frame and that working frame (pass the negative of the
//! simulation area's rotation angle to de-rotate, the positive angle to
//! rotate back).

use nalgebra::{Point2, Rotation2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb2 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb2 {
    /// Creates an AABB from explicit bounds.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Computes the AABB of a polygon ring.
    ///
    /// Returns a degenerate zero box for an empty ring.
    pub fn from_ring(ring: &[(f64, f64)]) -> Self {
        if ring.is_empty() {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for &(x, y) in ring {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the box (x extent).
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box (y extent).
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Area of the box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Midpoint of the box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Clamped overlap area with another box; 0 if disjoint.
    pub fn intersection_area(&self, other: &Aabb2) -> f64 {
        let (x_overlap, y_overlap) = self.overlap_extents(other);
        x_overlap * y_overlap
    }

    /// Per-axis overlap extents with another box, each clamped at 0.
    pub fn overlap_extents(&self, other: &Aabb2) -> (f64, f64) {
        let x_overlap = (self.max_x.min(other.max_x) - self.min_x.max(other.min_x)).max(0.0);
        let y_overlap = (self.max_y.min(other.max_y) - self.min_y.max(other.min_y)).max(0.0);
        (x_overlap, y_overlap)
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Aabb2) -> Aabb2 {
        Aabb2 {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The box corners as a counter-clockwise rectangle ring starting at the
    /// minimum corner.
    pub fn to_ring(&self) -> Vec<(f64, f64)> {
        vec![
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ]
    }
}

/// Rotates a point about the origin by `angle` radians (counter-clockwise).
pub fn rotate_point(point: (f64, f64), angle: f64) -> (f64, f64) {
    let rotated = Rotation2::new(angle) * Point2::new(point.0, point.1);
    (rotated.x, rotated.y)
}

/// Rotates every point of a ring about the origin by `angle` radians.
pub fn rotate_ring(ring: &[(f64, f64)], angle: f64) -> Vec<(f64, f64)> {
    let rotation = Rotation2::new(angle);
    ring.iter()
        .map(|&(x, y)| {
            let p = rotation * Point2::new(x, y);
            (p.x, p.y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_from_ring() {
        let aabb = Aabb2::from_ring(&[(1.0, 2.0), (4.0, 2.0), (4.0, 7.0), (1.0, 7.0)]);
        assert_relative_eq!(aabb.min_x, 1.0);
        assert_relative_eq!(aabb.min_y, 2.0);
        assert_relative_eq!(aabb.max_x, 4.0);
        assert_relative_eq!(aabb.max_y, 7.0);
        assert_relative_eq!(aabb.area(), 15.0);
    }

    #[test]
    fn test_intersection_area_disjoint() {
        let a = Aabb2::new(0.0, 0.0, 1.0, 1.0);
        let b = Aabb2::new(2.0, 2.0, 3.0, 3.0);
        assert_relative_eq!(a.intersection_area(&b), 0.0);
    }

    #[test]
    fn test_intersection_area_partial() {
        let a = Aabb2::new(0.0, 0.0, 2.0, 2.0);
        let b = Aabb2::new(1.0, 1.0, 3.0, 3.0);
        assert_relative_eq!(a.intersection_area(&b), 1.0);
        assert_relative_eq!(b.intersection_area(&a), 1.0);
    }

    #[test]
    fn test_union_contains_both() {
        let a = Aabb2::new(0.0, 0.0, 1.0, 1.0);
        let b = Aabb2::new(2.0, -1.0, 3.0, 0.5);
        let u = a.union(&b);
        assert_relative_eq!(u.min_x, 0.0);
        assert_relative_eq!(u.min_y, -1.0);
        assert_relative_eq!(u.max_x, 3.0);
        assert_relative_eq!(u.max_y, 1.0);
    }

    #[test]
    fn test_rotate_ring_round_trip() {
        let ring = vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)];
        let angle = 0.37;
        let there = rotate_ring(&ring, -angle);
        let back = rotate_ring(&there, angle);
        for (orig, round) in ring.iter().zip(back.iter()) {
            assert_relative_eq!(orig.0, round.0, epsilon = 1e-12);
            assert_relative_eq!(orig.1, round.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let (x, y) = rotate_point((1.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 1.0, epsilon = 1e-12);
    }
}
