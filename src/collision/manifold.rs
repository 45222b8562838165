//! Contact manifold generation by clipping the incident edge against the
//! reference edge of two colliding polygons.

use crate::math::vec2::Vec2;
use crate::shapes::Polygon;

/// The edge of a polygon that takes part in a collision.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    /// The vertex furthest along the search direction.
    max: Vec2,
    v1: Vec2,
    v2: Vec2,
    /// `v2 - v1`
    edge: Vec2,
}

/// Finds the edge of `shape` most involved in a collision along `direction`.
///
/// Starts from the deepest vertex (first maximum) and picks whichever of its
/// two adjacent edges is more perpendicular to `direction`.
fn best_edge(shape: &Polygon, direction: Vec2) -> Edge {
    let vertices = shape.vertices();
    let n = vertices.len();

    let mut max_proj = f64::NEG_INFINITY;
    let mut index = 0;
    for (i, vertex) in vertices.iter().enumerate() {
        let projection = direction.dot(*vertex);
        if projection > max_proj {
            max_proj = projection;
            index = i;
        }
    }

    let current = vertices[index];
    let next = vertices[(index + 1) % n];
    let prev = vertices[(index + n - 1) % n];

    let l = (current - next).normalize();
    let r = (current - prev).normalize();

    if r.dot(direction).abs() <= l.dot(direction).abs() {
        Edge { max: current, v1: prev, v2: current, edge: current - prev }
    } else {
        Edge { max: current, v1: current, v2: next, edge: next - current }
    }
}

/// Keeps the part of segment `v1 -> v2` whose projection on `axis` is at least
/// the projection of `reference`, inserting the crossing point when the
/// segment straddles it.
fn clip(v1: Vec2, v2: Vec2, axis: Vec2, reference: Vec2) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(2);
    let o = axis.dot(reference);

    let d1 = axis.dot(v1) - o;
    let d2 = axis.dot(v2) - o;

    if d1 >= 0.0 {
        points.push(v1);
    }
    if d2 >= 0.0 {
        points.push(v2);
    }
    if d1 * d2 < 0.0 {
        points.push(v1.lerp(v2, d1 / (d1 - d2)));
    }

    points
}

/// Computes up to two contact points between overlapping polygons.
///
/// `normal` must point from `b` towards `a`, as returned by
/// [`mtv`](super::detection::mtv). Returns an empty vector when clipping
/// leaves fewer than two points or either polygon is invalid.
pub fn contact_points(a: &Polygon, b: &Polygon, normal: Vec2) -> Vec<Vec2> {
    if !a.valid() || !b.valid() {
        return Vec::new();
    }
    let normal = normal.normalize();

    let edge_a = best_edge(a, -normal);
    let edge_b = best_edge(b, normal);

    // The reference edge is the one more perpendicular to the normal.
    let projection_a = edge_a.edge.normalize().dot(normal).abs();
    let projection_b = edge_b.edge.normalize().dot(normal).abs();
    let flipped = projection_b <= projection_a;

    let (reference, incident) = if flipped { (edge_b, edge_a) } else { (edge_a, edge_b) };

    let refv = reference.edge.normalize();

    // Clip the incident edge by the first vertex of the reference edge
    let points = clip(incident.v1, incident.v2, refv, reference.v1);
    if points.len() < 2 {
        return Vec::new();
    }

    // Then from the other side by the second reference vertex
    let mut remaining = clip(points[0], points[1], -refv, reference.v2);
    if remaining.len() < 2 {
        return Vec::new();
    }

    // Face normal of the reference edge, facing the incident polygon
    let mut reference_normal = reference.edge.perpendicular().normalize();
    let towards_incident = if flipped { normal } else { -normal };
    if reference_normal.dot(towards_incident) < 0.0 {
        reference_normal = -reference_normal;
    }

    let maximum = reference_normal.dot(reference.max);
    remaining.retain(|point| reference_normal.dot(*point) < maximum);
    remaining
}
