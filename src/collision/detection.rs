//! Narrow-phase overlap test for convex polygons using the Separating Axis Theorem.

use crate::math::vec2::Vec2;
use crate::shapes::Polygon;

/// Returns `true` when the projections `(min, max)` of two shapes are disjoint.
fn disjoint((min_a, max_a): (f64, f64), (min_b, max_b): (f64, f64)) -> bool {
    max_a < min_b || max_b < min_a
}

/// Computes the minimum translation vector that separates `a` from `b`.
///
/// Candidate axes are the edge normals of `a` followed by those of `b`. The
/// returned vector points from `b`'s centroid towards `a`'s, so translating
/// `a` by it (or `b` by its negation) removes the overlap. Returns `None` when
/// a separating axis exists or either polygon is invalid.
pub fn mtv(a: &Polygon, b: &Polygon) -> Option<Vec2> {
    if !a.valid() || !b.valid() {
        return None;
    }

    let mut min_overlap = f64::INFINITY;
    let mut mtv_axis = Vec2::new(0.0, 0.0);

    for &axis in a.normals().iter().chain(b.normals()) {
        // Ensure axis is valid (degenerate edges normalize to zero)
        if axis.magnitude_squared() < 1e-10 {
            continue;
        }

        let proj_a = a.project(axis);
        let proj_b = b.project(axis);

        if disjoint(proj_a, proj_b) {
            // Separating axis found, no collision
            return None;
        }

        // Shortest push out along this axis, also when one interval contains the other.
        let current_overlap = (proj_a.1 - proj_b.0).min(proj_b.1 - proj_a.0);

        // Strictly smaller wins, so the first axis keeps a tie.
        if current_overlap < min_overlap {
            min_overlap = current_overlap;
            mtv_axis = axis;
        }
    }

    if !min_overlap.is_finite() {
        return None;
    }

    let center_to_center = a.centroid() - b.centroid();
    let mut normal = mtv_axis.normalize();
    if center_to_center.dot(normal) < 0.0 {
        // Flip normal if it points from A to B
        normal = -normal;
    }

    Some(normal * min_overlap)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn square_at(x: f64, y: f64) -> Polygon {
        Polygon::rectangle(Vec2::new(x, y), 1.0, 1.0)
    }

    #[test]
    fn test_mtv_overlapping_squares() {
        let a = square_at(0.0, 0.0);
        let b = square_at(0.5, 0.0);

        let m = mtv(&a, &b).unwrap();
        // Depth is 0.5 along x, pushing A away from B
        assert!(m.approx_eq(Vec2::new(-0.5, 0.0), EPSILON));

        let reversed = mtv(&b, &a).unwrap();
        assert!(reversed.approx_eq(Vec2::new(0.5, 0.0), EPSILON));
    }

    #[test]
    fn test_mtv_separates() {
        let mut a = square_at(0.0, 0.2);
        let b = square_at(0.7, 0.0);
        let m = mtv(&a, &b).unwrap();
        a.translate(m.x(), m.y());

        let after = mtv(&a, &b).map(|v| v.magnitude()).unwrap_or(0.0);
        assert!(after < EPSILON);
    }

    #[test]
    fn test_mtv_contained_shape_takes_shortest_exit() {
        // B sits inside A, nearer A's left edge
        let a = Polygon::rectangle(Vec2::new(0.0, 0.0), 4.0, 4.0);
        let b = square_at(-1.0, 0.0);

        // x: min(2 - -1.5, -0.5 - -2) = 1.5, y: min(2.5, 2.5) = 2.5
        let m = mtv(&a, &b).unwrap();
        assert!(m.approx_eq(Vec2::new(1.5, 0.0), EPSILON));

        let mut moved = a.clone();
        moved.translate(m.x(), m.y());
        let after = mtv(&moved, &b).map(|v| v.magnitude()).unwrap_or(0.0);
        assert!(after < EPSILON);
    }

    #[test]
    fn test_mtv_no_collision() {
        let a = square_at(0.0, 0.0);
        let b = square_at(3.0, 0.0);
        assert!(mtv(&a, &b).is_none());
    }

    #[test]
    fn test_mtv_touching_has_zero_depth() {
        let a = square_at(0.0, 0.0);
        let b = square_at(1.0, 0.0);
        let m = mtv(&a, &b).unwrap();
        assert!(m.magnitude() < EPSILON);
    }

    #[test]
    fn test_mtv_ignores_winding() {
        let a = square_at(0.0, 0.0);
        let mut b = square_at(0.0, 0.8);
        b.rewind();
        let m = mtv(&a, &b).unwrap();
        assert!(m.approx_eq(Vec2::new(0.0, -0.2), EPSILON));
    }

    #[test]
    fn test_mtv_invalid_polygon() {
        let a = square_at(0.0, 0.0);
        let line = Polygon::new(vec![Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)]);
        assert!(mtv(&a, &line).is_none());
        assert!(mtv(&line, &a).is_none());
    }
}
