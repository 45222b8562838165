use crate::objects::rigid_body::{Body, BodyType};

/// Advances a body by `delta` time units using semi-implicit Euler.
///
/// Accelerations are per-step velocity increments and are not scaled by
/// `delta`. Damping is applied after moving, as `velocity *= factor^delta`.
pub fn integrate(body: &mut Body, delta: f64) {
    match body.body_type {
        BodyType::Static => {}
        BodyType::Kinematic => {
            advance(body, delta);
            body.clear_forces();
        }
        BodyType::Dynamic => {
            // Update velocities with this step's acceleration
            body.linear_velocity = body.linear_velocity + body.linear_acceleration;
            body.angular_velocity += body.angular_acceleration;

            advance(body, delta);
            body.clear_forces();

            body.linear_velocity = body.linear_velocity * body.material.linear_damping.powf(delta);
            body.angular_velocity *= body.material.angular_damping.powf(delta);
        }
    }
}

/// Moves the body by its current velocities.
fn advance(body: &mut Body, delta: f64) {
    let offset = body.linear_velocity * delta;
    body.translate(offset);
    body.rotate(body.angular_velocity * delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::objects::BodyDefinition;
    use crate::shapes::Polygon;
    const EPSILON: f64 = 1e-9;

    fn square() -> Polygon {
        Polygon::rectangle(Vec2::new(0.0, 0.0), 1.0, 1.0)
    }

    #[test]
    fn test_integrate_linear_motion_no_acceleration() {
        let def = BodyDefinition::dynamic(square())
            .with_linear_velocity(Vec2::new(10.0, -5.0))
            .with_damping(0.0);
        let mut body = Body::new(&def).unwrap();

        integrate(&mut body, 0.1);

        assert!(body.position().approx_eq(Vec2::new(1.0, -0.5), EPSILON));
        assert_eq!(body.linear_velocity, Vec2::new(10.0, -5.0)); // Velocity unchanged
        assert!(body.shape().centroid().approx_eq(Vec2::new(1.0, -0.5), EPSILON));
    }

    #[test]
    fn test_integrate_acceleration_is_per_step() {
        let def = BodyDefinition::dynamic(square())
            .with_linear_acceleration(Vec2::new(5.0, 0.0))
            .with_angular_acceleration(2.0)
            .with_damping(0.0);
        let mut body = Body::new(&def).unwrap();

        integrate(&mut body, 0.1);

        // v = v0 + a = (5, 0); p = v * dt = (0.5, 0)
        assert!(body.linear_velocity.approx_eq(Vec2::new(5.0, 0.0), EPSILON));
        assert!(body.position().approx_eq(Vec2::new(0.5, 0.0), EPSILON));
        assert!((body.angular_velocity - 2.0).abs() < EPSILON);
        assert!((body.angle() - 0.2).abs() < EPSILON);
        // Accelerations cleared
        assert_eq!(body.linear_acceleration, Vec2::new(0.0, 0.0));
        assert_eq!(body.angular_acceleration, 0.0);

        integrate(&mut body, 0.1);
        assert!(body.linear_velocity.approx_eq(Vec2::new(5.0, 0.0), EPSILON));
    }

    #[test]
    fn test_integrate_damping() {
        let def = BodyDefinition::dynamic(square())
            .with_linear_velocity(Vec2::new(1.0, 0.0))
            .with_angular_velocity(1.0);
        let mut body = Body::new(&def).unwrap();

        integrate(&mut body, 2.0);

        // Default damping 0.1 keeps 0.9 per time unit
        assert!((body.linear_velocity.x() - 0.81).abs() < EPSILON);
        assert!((body.angular_velocity - 0.81).abs() < EPSILON);
        // Moved with the undamped velocity
        assert!(body.position().approx_eq(Vec2::new(2.0, 0.0), EPSILON));
    }

    #[test]
    fn test_integrate_kinematic_ignores_acceleration_and_damping() {
        let def = BodyDefinition::kinematic(square())
            .with_linear_velocity(Vec2::new(1.0, 1.0))
            .with_linear_acceleration(Vec2::new(100.0, 0.0));
        let mut body = Body::new(&def).unwrap();

        integrate(&mut body, 1.0);

        assert_eq!(body.linear_velocity, Vec2::new(1.0, 1.0));
        assert!(body.position().approx_eq(Vec2::new(1.0, 1.0), EPSILON));
        assert_eq!(body.linear_acceleration, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_integrate_static_object() {
        let def = BodyDefinition::fixed(square())
            .with_position(Vec2::new(1.0, 1.0))
            .with_linear_velocity(Vec2::new(1.0, 1.0))
            .with_angular_velocity(1.0);
        let mut body = Body::new(&def).unwrap();
        let before = body.clone();

        integrate(&mut body, 1.0);

        assert_eq!(body, before);
    }
}
