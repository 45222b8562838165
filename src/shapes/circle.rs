use std::f64::consts::PI;

use crate::collision::AABB;
use crate::math::vec2::Vec2;

/// A circle defined by its centre and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// A circle is valid when it has a positive radius.
    pub fn valid(&self) -> bool {
        self.radius > 0.0
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }

    pub fn aabb(&self) -> AABB {
        AABB::from_center(self.center, self.radius, self.radius)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center + Vec2::new(dx, dy);
    }

    /// Overlap test; circles that only touch do not intersect.
    pub fn intersects(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.center.distance_squared(Vec2::new(x, y)) <= self.radius * self.radius
    }

    /// Whether `other` lies entirely within this circle.
    pub fn contains(&self, other: &Circle) -> bool {
        other.radius <= self.radius
            && self.center.distance(other.center) + other.radius <= self.radius
    }
}
