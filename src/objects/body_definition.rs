use crate::common::material::{DEFAULT_DAMPING, DEFAULT_RESTITUTION};
use crate::math::vec2::Vec2;
use crate::shapes::Polygon;

use super::rigid_body::BodyType;

pub const DEFAULT_MASS: f64 = 0.6;
/// Fraction of the polygon's moment of inertia used when no inertia is given.
pub const DEFAULT_INERTIA_SCALE: f64 = 0.2;

/// Construction parameters for a [`Body`](super::Body).
///
/// `shape` is given in local coordinates and is moved to `position`, then
/// rotated by `angle` degrees about it, when the body is built. Unset
/// optional fields fall back to the crate defaults; explicit zeros are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDefinition {
    pub body_type: BodyType,
    pub shape: Polygon,
    pub position: Vec2,
    /// Degrees.
    pub angle: f64,
    pub linear_velocity: Option<Vec2>,
    pub angular_velocity: Option<f64>,
    pub linear_acceleration: Option<Vec2>,
    pub angular_acceleration: Option<f64>,
    pub mass: Option<f64>,
    /// Overrides the moment of inertia derived from the shape.
    pub inertia: Option<f64>,
    pub linear_damping: Option<f64>,
    pub angular_damping: Option<f64>,
    pub restitution: Option<f64>,
}

impl BodyDefinition {
    pub fn new(body_type: BodyType, shape: Polygon) -> Self {
        BodyDefinition {
            body_type,
            shape,
            position: Vec2::new(0.0, 0.0),
            angle: 0.0,
            linear_velocity: None,
            angular_velocity: None,
            linear_acceleration: None,
            angular_acceleration: None,
            mass: None,
            inertia: None,
            linear_damping: None,
            angular_damping: None,
            restitution: None,
        }
    }

    pub fn dynamic(shape: Polygon) -> Self {
        Self::new(BodyType::Dynamic, shape)
    }

    pub fn kinematic(shape: Polygon) -> Self {
        Self::new(BodyType::Kinematic, shape)
    }

    /// A static body with infinite mass, so impulses never move it.
    pub fn fixed(shape: Polygon) -> Self {
        Self::new(BodyType::Static, shape).with_mass(f64::INFINITY)
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    pub fn with_linear_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = Some(velocity);
        self
    }

    pub fn with_angular_velocity(mut self, velocity: f64) -> Self {
        self.angular_velocity = Some(velocity);
        self
    }

    pub fn with_linear_acceleration(mut self, acceleration: Vec2) -> Self {
        self.linear_acceleration = Some(acceleration);
        self
    }

    pub fn with_angular_acceleration(mut self, acceleration: f64) -> Self {
        self.angular_acceleration = Some(acceleration);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = Some(inertia);
        self
    }

    /// Sets both linear and angular damping.
    pub fn with_damping(self, damping: f64) -> Self {
        self.with_linear_damping(damping).with_angular_damping(damping)
    }

    pub fn with_linear_damping(mut self, damping: f64) -> Self {
        self.linear_damping = Some(damping);
        self
    }

    pub fn with_angular_damping(mut self, damping: f64) -> Self {
        self.angular_damping = Some(damping);
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = Some(restitution);
        self
    }

    pub fn mass_or_default(&self) -> f64 {
        self.mass.unwrap_or(DEFAULT_MASS)
    }

    pub fn linear_damping_or_default(&self) -> f64 {
        self.linear_damping.unwrap_or(DEFAULT_DAMPING)
    }

    pub fn angular_damping_or_default(&self) -> f64 {
        self.angular_damping.unwrap_or(DEFAULT_DAMPING)
    }

    pub fn restitution_or_default(&self) -> f64 {
        self.restitution.unwrap_or(DEFAULT_RESTITUTION)
    }
}
