use crate::collision::AABB;
use crate::common::Material;
use crate::error::PhysicsError;
use crate::math::vec2::Vec2;
use crate::shapes::Polygon;

use super::body_definition::{BodyDefinition, DEFAULT_INERTIA_SCALE};

/// How a body takes part in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyType {
    /// Never moves on its own. Build with infinite mass so impulses cannot move it either.
    Static,
    /// Moves by its velocity but never accelerates, damps or receives impulses.
    Kinematic,
    /// Fully simulated.
    Dynamic,
}

/// Identifies a body inside a [`World`](crate::world::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u64);

impl BodyHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A rigid polygonal body.
///
/// The body owns a world-space copy of its shape and keeps it in sync with
/// `position` and `angle`, so position and orientation only change through
/// [`Body::translate`] and [`Body::rotate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub body_type: BodyType,
    pub material: Material,

    // Primary state
    position: Vec2,
    angle: f64, // Degrees, wrapped into [0, 360)
    pub linear_velocity: Vec2,
    pub angular_velocity: f64, // Degrees per time unit
    /// Per-step velocity increment, cleared after every integration.
    pub linear_acceleration: Vec2,
    pub angular_acceleration: f64,

    // Physical properties
    mass: f64,
    inverse_mass: f64, // 0.0 for infinite mass
    inertia: f64,
    inverse_inertia: f64,

    shape: Polygon,
    // Contact points from the most recent collision pass
    contacts: Vec<Vec2>,
}

impl Body {
    /// Builds a body from its definition.
    ///
    /// Fails when the shape has fewer than three vertices, the mass is not
    /// positive, or an explicit inertia is negative. Infinite mass or inertia
    /// is allowed and yields a zero inverse.
    pub fn new(definition: &BodyDefinition) -> Result<Self, PhysicsError> {
        let shape = &definition.shape;
        if !shape.valid() {
            return Err(PhysicsError::InvalidShape { vertices: shape.len() });
        }

        let mass = definition.mass_or_default();
        if !(mass > 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }

        let inertia = match definition.inertia {
            Some(inertia) if !(inertia >= 0.0) => return Err(PhysicsError::InvalidInertia(inertia)),
            Some(inertia) => inertia,
            None => DEFAULT_INERTIA_SCALE * shape.moment_of_inertia(mass),
        };

        let mut body = Body {
            body_type: definition.body_type,
            material: Material::new(
                definition.restitution_or_default(),
                definition.linear_damping_or_default(),
                definition.angular_damping_or_default(),
            ),
            position: Vec2::new(0.0, 0.0),
            angle: 0.0,
            linear_velocity: definition.linear_velocity.unwrap_or_default(),
            angular_velocity: definition.angular_velocity.unwrap_or(0.0),
            linear_acceleration: definition.linear_acceleration.unwrap_or_default(),
            angular_acceleration: definition.angular_acceleration.unwrap_or(0.0),
            mass,
            inverse_mass: inverse(mass),
            inertia,
            inverse_inertia: inverse(inertia),
            shape: shape.clone(),
            contacts: Vec::new(),
        };

        body.translate(definition.position);
        body.rotate(definition.angle);
        Ok(body)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Orientation in degrees, within [0, 360).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn shape(&self) -> &Polygon {
        &self.shape
    }

    pub fn aabb(&self) -> AABB {
        *self.shape.aabb()
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inverse_inertia(&self) -> f64 {
        self.inverse_inertia
    }

    /// Contact points found for this body during the last step.
    pub fn contacts(&self) -> &[Vec2] {
        &self.contacts
    }

    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Moves the body and its shape by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        self.position = self.position + offset;
        self.shape.translate(offset.x(), offset.y());
    }

    /// Rotates the body by `degrees`. The shape spins about its own centroid.
    pub fn rotate(&mut self, degrees: f64) {
        if degrees == 0.0 {
            return;
        }
        self.angle = (self.angle + degrees).rem_euclid(360.0);
        self.shape.rotate(degrees, None);
    }

    /// Applies impulse `j` at world-space `point`.
    pub fn impulse(&mut self, j: Vec2, point: Vec2) {
        self.linear_velocity = self.linear_velocity + j * self.inverse_mass;
        self.angular_velocity += (point - self.position).cross(j) * self.inverse_inertia;
    }

    /// Zeroes both accelerations.
    pub fn clear_forces(&mut self) {
        self.linear_acceleration = Vec2::new(0.0, 0.0);
        self.angular_acceleration = 0.0;
    }

    pub(crate) fn clear_contacts(&mut self) {
        self.contacts.clear();
    }

    pub(crate) fn add_contacts(&mut self, points: &[Vec2]) {
        self.contacts.extend_from_slice(points);
    }
}

/// `1 / value` for finite positive values, otherwise zero.
fn inverse(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        1.0 / value
    } else {
        0.0
    }
}
