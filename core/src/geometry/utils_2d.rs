//! 2D geometry utilities shared by the relation engine and the chord finder.
//!
//! Everything here is pure and allocation-free so it can run inside the
//! O(n²) recompute loop without showing up in a profile.

use super::{Point2, Vector2, EPSILON};

// =============================================================================
// Point Operations
// =============================================================================

/// Compute distance between two 2D points.
#[inline]
pub fn distance(p1: &Point2, p2: &Point2) -> f64 {
    nalgebra::distance(p1, p2)
}

// =============================================================================
// Vector Operations
// =============================================================================

/// 2D cross product (z-component of 3D cross product).
/// Positive if v2 is counter-clockwise from v1.
#[inline]
pub fn cross_2d(v1: &Vector2, v2: &Vector2) -> f64 {
    v1.x * v2.y - v1.y * v2.x
}

/// Perpendicular vector (90° clockwise rotation): `(dx, dy) -> (dy, -dx)`.
#[inline]
pub fn perpendicular_cw(v: &Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

// =============================================================================
// Circle Operations
// =============================================================================

/// True if `point` lies inside or on the boundary of the circle.
#[inline]
pub fn point_in_circle(point: &Point2, center: &Point2, radius: f64) -> bool {
    distance(point, center) <= radius
}

/// Absolute deviation of `point` from the circle boundary.
#[inline]
pub fn boundary_deviation(point: &Point2, center: &Point2, radius: f64) -> f64 {
    (distance(point, center) - radius).abs()
}

// =============================================================================
// Line-Line Intersection
// =============================================================================

/// Calculate intersection point of two 2D line segments.
/// Returns Some(point) if segments intersect, None otherwise.
///
/// Parallel (and collinear) segments report no intersection.
pub fn segment_intersect(s1: &Point2, e1: &Point2, s2: &Point2, e2: &Point2) -> Option<Point2> {
    let d1 = *e1 - *s1;
    let d2 = *e2 - *s2;

    let denom = cross_2d(&d1, &d2);
    if denom.abs() < EPSILON {
        return None; // Parallel
    }

    let offset = *s2 - *s1;
    let t = cross_2d(&offset, &d2) / denom;
    let u = cross_2d(&offset, &d1) / denom;

    // Check if intersection is within both segments (with small tolerance)
    if t >= -EPSILON && t <= 1.0 + EPSILON && u >= -EPSILON && u <= 1.0 + EPSILON {
        Some(*s1 + d1 * t)
    } else {
        None
    }
}

// =============================================================================
// Tests
// =============================================================================
