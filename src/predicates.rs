//! Geometric predicates over 2D projected coordinates (§4.1).
//!
//! All of these operate on the signed z-component of a 2D cross product as
//! the orientation test. The tripled check in [`is_triangle_valid`] and the
//! exact (non-epsilon) zero test in [`is_triangle_degenerate`] are
//! deliberate — see SPEC_FULL.md §9 on floating-point predicate fragility.
//! Do not collapse either into a single orientation test.

use nalgebra::{Point2, Vector2};

/// Signed area sign: the z-component of `a × b` for 2D vectors.
pub fn cross2d(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

fn edge_cross(origin: Point2<f64>, to: Point2<f64>, p: Point2<f64>) -> f64 {
    cross2d(to - origin, p - origin)
}

/// True iff `a, b, c` are CCW and non-degenerate, checked from all three
/// vertices as the pivot. A triangle that is only "valid" from one vertex
/// ordering is rejected.
pub fn is_triangle_valid(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    edge_cross(a, b, c) > 0.0 && edge_cross(b, c, a) > 0.0 && edge_cross(c, a, b) > 0.0
}

/// True iff the signed area of `a, b, c` is exactly zero.
pub fn is_triangle_degenerate(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    cross2d(b - a, c - a) == 0.0
}

/// True iff `p` lies inside or on the boundary of triangle `(a, b, c)`.
/// Only ever evaluated against **original** input triangles, never against
/// optimizer-generated ones.
pub fn point_in_tri(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    edge_cross(a, b, p) >= 0.0 && edge_cross(b, c, p) >= 0.0 && edge_cross(c, a, p) >= 0.0
}

/// True iff `p` lies strictly between `a` and `b` along the line through
/// them. Only meaningful once `p, a, b` are already known colinear.
pub fn vertex_between(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> bool {
    (p - a).dot(&(p - b)) < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccw_triangle_is_valid() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        let c = Point2::new(0.0, 10.0);
        assert!(is_triangle_valid(a, b, c));
    }

    #[test]
    fn cw_triangle_is_invalid() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.0, 10.0);
        let c = Point2::new(10.0, 0.0);
        assert!(!is_triangle_valid(a, b, c));
    }

    #[test]
    fn colinear_triangle_is_degenerate_and_invalid() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(5.0, 0.0);
        let c = Point2::new(10.0, 0.0);
        assert!(is_triangle_degenerate(a, b, c));
        assert!(!is_triangle_valid(a, b, c));
    }

    #[test]
    fn point_in_tri_accepts_boundary() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        let c = Point2::new(0.0, 10.0);
        assert!(point_in_tri(Point2::new(5.0, 0.0), a, b, c));
        assert!(point_in_tri(Point2::new(1.0, 1.0), a, b, c));
        assert!(!point_in_tri(Point2::new(-1.0, -1.0), a, b, c));
    }

    #[test]
    fn vertex_between_midpoint() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert!(vertex_between(Point2::new(5.0, 0.0), a, b));
        assert!(!vertex_between(Point2::new(15.0, 0.0), a, b));
        assert!(!vertex_between(Point2::new(-1.0, 0.0), a, b));
    }
}
