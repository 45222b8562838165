//! Impulse and positional response for a colliding body pair.

use tracing::trace;

use crate::math::vec2::Vec2;
use crate::objects::rigid_body::Body;

use super::manifold::contact_points;

/// Applies the collision impulse between `body` and `other`.
///
/// `mtv` is the minimum translation vector separating `body` from `other`
/// (pointing from `other` towards `body`). The impulse is split evenly over
/// the contact points, which are also recorded on `body`. `other` only
/// receives the opposite impulse when it is dynamic. Returns the contact
/// points used, empty when no impulse was applied.
pub fn collision_impulse(body: &mut Body, other: &mut Body, mtv: Vec2) -> Vec<Vec2> {
    let normal = mtv.normalize();

    let relative_velocity_normal = (body.linear_velocity - other.linear_velocity).dot(normal);

    // If objects are already moving apart, no impulse needed
    if relative_velocity_normal > 0.0 {
        return Vec::new();
    }

    let total_inverse_mass = body.inverse_mass() + other.inverse_mass();
    if total_inverse_mass <= 0.0 {
        return Vec::new();
    }

    let e = body.material.restitution.min(other.material.restitution);

    let mut j = -(1.0 + e) * relative_velocity_normal / total_inverse_mass;
    if body.is_static() || other.is_static() {
        j *= 2.0;
    }

    let contacts = contact_points(body.shape(), other.shape(), normal);
    if contacts.is_empty() {
        return contacts;
    }
    body.add_contacts(&contacts);

    let impulse = normal * (j / contacts.len() as f64);
    for &contact in &contacts {
        body.impulse(impulse, contact);
        if other.is_dynamic() {
            other.impulse(-impulse, contact);
        }
    }

    trace!(
        vn = relative_velocity_normal,
        restitution = e,
        j,
        contacts = contacts.len(),
        "applied collision impulse"
    );
    contacts
}

/// Pushes the pair apart along `mtv`.
///
/// Against a static body, `body` takes the whole correction. Otherwise each
/// body moves by its share of the inverse mass, and `other` only moves when
/// it is dynamic.
pub fn positional_correction(body: &mut Body, other: &mut Body, mtv: Vec2) {
    if other.is_static() {
        body.translate(mtv);
        return;
    }

    let total_inverse_mass = body.inverse_mass() + other.inverse_mass();
    if total_inverse_mass <= 0.0 {
        return;
    }

    body.translate(mtv * (body.inverse_mass() / total_inverse_mass));
    if other.is_dynamic() {
        other.translate(-mtv * (other.inverse_mass() / total_inverse_mass));
    }
}
