//! Edge crossing test and intersection parameter (§4.2, §4.3).

use nalgebra::Point2;

use crate::predicates::{cross2d, is_triangle_degenerate, is_triangle_valid};

fn point_eq(a: Point2<f64>, b: Point2<f64>) -> bool {
    a.x == b.x && a.y == b.y
}

/// `PointsStraddleLine`: does the segment `(p1, p2)` cross to both sides of
/// the (infinite) line through `(l1, l2)`?
pub fn points_straddle_line(p1: Point2<f64>, p2: Point2<f64>, l1: Point2<f64>, l2: Point2<f64>) -> bool {
    let both_colinear = is_triangle_degenerate(l1, l2, p1) && is_triangle_degenerate(l1, l2, p2);
    if both_colinear {
        let dir = l2 - l1;
        let dots = [
            (p1 - l1).dot(&dir),
            (p1 - l2).dot(&dir),
            (p2 - l1).dot(&dir),
            (p2 - l2).dot(&dir),
        ];
        let has_pos = dots.iter().any(|&d| d > 0.0);
        let has_neg = dots.iter().any(|&d| d < 0.0);
        return has_pos && has_neg;
    }

    let shares_endpoint =
        point_eq(p1, l1) || point_eq(p1, l2) || point_eq(p2, l1) || point_eq(p2, l2);
    if shares_endpoint {
        return false;
    }

    !((is_triangle_valid(l1, l2, p1) && is_triangle_valid(l1, l2, p2))
        || (is_triangle_valid(l1, p1, l2) && is_triangle_valid(l1, p2, l2)))
}

/// `EdgesCross`: do segments `(a1, a2)` and `(b1, b2)` cross?
///
/// Identical unordered endpoint pairs count as crossing. Shared single
/// endpoints (a touch, not a crossing) do not, per
/// [`points_straddle_line`].
pub fn edges_cross(a1: Point2<f64>, a2: Point2<f64>, b1: Point2<f64>, b2: Point2<f64>) -> bool {
    let same_pair = (point_eq(a1, b1) && point_eq(a2, b2)) || (point_eq(a1, b2) && point_eq(a2, b1));
    if same_pair {
        return true;
    }
    points_straddle_line(a1, a2, b1, b2) && points_straddle_line(b1, b2, a1, a2)
}

/// `EdgeIntersection`: the point and interpolation parameter `f` (measured
/// along `p1 -> p2`) where segment `(p1, p2)` crosses the line through
/// `(l1, l2)`. `None` if the pair is exactly colinear.
pub fn edge_intersection(
    p1: Point2<f64>,
    p2: Point2<f64>,
    l1: Point2<f64>,
    l2: Point2<f64>,
) -> Option<(Point2<f64>, f64)> {
    let cross1 = cross2d(p1 - l1, p1 - l2);
    let cross2 = cross2d(p2 - l1, p2 - l2);
    let denom = cross1 - cross2;
    if denom == 0.0 {
        return None;
    }
    let f = cross1 / denom;
    let point = p1 + (p2 - p1) * f;
    Some((point, f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_segments_cross() {
        let a1 = Point2::new(0.0, 0.0);
        let a2 = Point2::new(10.0, 10.0);
        let b1 = Point2::new(0.0, 10.0);
        let b2 = Point2::new(10.0, 0.0);
        assert!(edges_cross(a1, a2, b1, b2));
        assert!(edges_cross(b1, b2, a1, a2));
    }

    #[test]
    fn touching_at_shared_endpoint_does_not_cross() {
        let a1 = Point2::new(0.0, 0.0);
        let a2 = Point2::new(10.0, 0.0);
        let b1 = Point2::new(10.0, 0.0);
        let b2 = Point2::new(10.0, 10.0);
        assert!(!edges_cross(a1, a2, b1, b2));
    }

    #[test]
    fn disjoint_segments_do_not_cross() {
        let a1 = Point2::new(0.0, 0.0);
        let a2 = Point2::new(1.0, 0.0);
        let b1 = Point2::new(5.0, 5.0);
        let b2 = Point2::new(6.0, 6.0);
        assert!(!edges_cross(a1, a2, b1, b2));
    }

    #[test]
    fn identical_pair_crosses() {
        let a1 = Point2::new(0.0, 0.0);
        let a2 = Point2::new(10.0, 0.0);
        assert!(edges_cross(a1, a2, a1, a2));
        assert!(edges_cross(a1, a2, a2, a1));
    }

    #[test]
    fn intersection_midpoint() {
        let p1 = Point2::new(0.0, 5.0);
        let p2 = Point2::new(10.0, 5.0);
        let l1 = Point2::new(5.0, 0.0);
        let l2 = Point2::new(5.0, 10.0);
        let (pt, f) = edge_intersection(p1, p2, l1, l2).unwrap();
        assert!((pt.x - 5.0).abs() < 1e-9);
        assert!((pt.y - 5.0).abs() < 1e-9);
        assert!((f - 0.5).abs() < 1e-9);
    }

    #[test]
    fn colinear_has_no_intersection_parameter() {
        let p1 = Point2::new(0.0, 0.0);
        let p2 = Point2::new(10.0, 0.0);
        let l1 = Point2::new(2.0, 0.0);
        let l2 = Point2::new(8.0, 0.0);
        assert!(edge_intersection(p1, p2, l1, l2).is_none());
    }
}
