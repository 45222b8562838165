//! Defines physical material properties.

pub const DEFAULT_RESTITUTION: f64 = 0.8;
pub const DEFAULT_DAMPING: f64 = 0.1;

/// Represents the surface and drag properties of a body.
///
/// Every field is stored as a retention factor, `clamp(1 - configured, 0, 1)`:
/// a configured damping of `0.1` keeps 90% of the velocity per time unit, and
/// a configured restitution of `0.8` keeps `0.2` as the bounce coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Coefficient used when resolving collisions. Range [0, 1].
    pub restitution: f64,
    /// Fraction of linear velocity kept per time unit. Range [0, 1].
    pub linear_damping: f64,
    /// Fraction of angular velocity kept per time unit. Range [0, 1].
    pub angular_damping: f64,
}

impl Material {
    /// Creates a material from configured restitution and damping amounts.
    pub fn new(restitution: f64, linear_damping: f64, angular_damping: f64) -> Self {
        Material {
            restitution: retention(restitution),
            linear_damping: retention(linear_damping),
            angular_damping: retention(angular_damping),
        }
    }
}

fn retention(configured: f64) -> f64 {
    (1.0 - configured).clamp(0.0, 1.0)
}

impl Default for Material {
    fn default() -> Self {
        Material::new(DEFAULT_RESTITUTION, DEFAULT_DAMPING, DEFAULT_DAMPING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_stored_as_retention() {
        let material = Material::default();
        assert!((material.restitution - 0.2).abs() < EPSILON);
        assert!((material.linear_damping - 0.9).abs() < EPSILON);
        assert!((material.angular_damping - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_clamped() {
        let material = Material::new(1.5, -0.5, 0.0);
        assert_eq!(material.restitution, 0.0);
        assert_eq!(material.linear_damping, 1.0);
        assert_eq!(material.angular_damping, 1.0);
    }
}
