use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::MathError;

/// A 2D point or direction.
///
/// A vector may be created frozen, in which case every in-place operation
/// panics. Value-returning operations always produce an unfrozen vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vec2 {
    x: f64,
    y: f64,
    frozen: bool,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0, frozen: true };
    pub const UP: Vec2 = Vec2 { x: 0.0, y: 1.0, frozen: true };

    /// Creates a new mutable Vec2.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, frozen: false }
    }

    /// Creates a read-only Vec2. Any in-place mutation panics.
    pub const fn frozen(x: f64, y: f64) -> Self {
        Self { x, y, frozen: true }
    }

    /// Creates a vector with both components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Returns a copy with the requested mutability.
    pub fn to_frozen(self, frozen: bool) -> Self {
        Self { frozen, ..self }
    }

    #[inline]
    #[track_caller]
    fn assert_mutable(&self) {
        assert!(!self.frozen, "{}", MathError::FrozenVector);
    }

    /// Sets both components.
    ///
    /// # Panics
    /// Panics if the vector is frozen. Use [`Vec2::try_set`] to get an error instead.
    #[track_caller]
    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.assert_mutable();
        self.x = x;
        self.y = y;
        self
    }

    /// Sets both components, reporting frozen vectors as an error.
    pub fn try_set(&mut self, x: f64, y: f64) -> Result<&mut Self, MathError> {
        if self.frozen {
            return Err(MathError::FrozenVector);
        }
        self.x = x;
        self.y = y;
        Ok(self)
    }

    #[track_caller]
    pub fn zero(&mut self) -> &mut Self {
        self.set(0.0, 0.0)
    }

    /// Calculates the dot product of two vectors.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product (scalar). Equivalent to z-component of 3D cross product.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Calculates the squared magnitude (length) of the vector.
    /// Useful for comparisons as it avoids a square root.
    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    /// Calculates the magnitude (length) of the vector.
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns a normalized version of the vector (unit vector).
    /// If the magnitude is zero, it returns a zero vector.
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            Self::new(0.0, 0.0)
        } else {
            Self::new(self.x / mag, self.y / mag)
        }
    }

    #[track_caller]
    pub fn normalize_mut(&mut self) -> &mut Self {
        let n = self.normalize();
        self.set(n.x, n.y)
    }

    pub fn scale(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    #[track_caller]
    pub fn scale_mut(&mut self, scalar: f64) -> &mut Self {
        self.set(self.x * scalar, self.y * scalar)
    }

    pub fn invert(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    #[track_caller]
    pub fn invert_mut(&mut self) -> &mut Self {
        self.set(-self.x, -self.y)
    }

    /// Calculates the squared distance between two vector points.
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).magnitude_squared()
    }

    /// Calculates the distance between two vector points.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Returns a vector perpendicular to this vector (90-degree counter-clockwise rotation).
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotates the vector by a given angle (in radians).
    pub fn rotate(self, angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    #[track_caller]
    pub fn rotate_mut(&mut self, angle: f64) -> &mut Self {
        let r = self.rotate(angle);
        self.set(r.x, r.y)
    }

    /// Rotates the vector around `origin` by `angle` radians.
    pub fn rotate_about(self, origin: Self, angle: f64) -> Self {
        (self - origin).rotate(angle) + origin
    }

    /// Linear interpolation towards `other`; `alpha = 0` keeps `self`.
    pub fn lerp(self, other: Self, alpha: f64) -> Self {
        let inverse = 1.0 - alpha;
        Self::new(
            self.x * inverse + other.x * alpha,
            self.y * inverse + other.y * alpha,
        )
    }

    #[track_caller]
    pub fn lerp_mut(&mut self, other: Self, alpha: f64) -> &mut Self {
        let l = self.lerp(other, alpha);
        self.set(l.x, l.y)
    }

    /// Component-wise comparison within `precision`.
    pub fn approx_eq(self, other: Self, precision: f64) -> bool {
        (self.x - other.x).abs() <= precision && (self.y - other.y).abs() <= precision
    }
}

// Frozen-ness is a mutability flag, not part of the value.
impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, vec: Vec2) -> Vec2 {
        vec * self
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        self.invert()
    }
}

impl AddAssign for Vec2 {
    #[track_caller]
    fn add_assign(&mut self, rhs: Self) {
        self.set(self.x + rhs.x, self.y + rhs.y);
    }
}

impl SubAssign for Vec2 {
    #[track_caller]
    fn sub_assign(&mut self, rhs: Self) {
        self.set(self.x - rhs.x, self.y - rhs.y);
    }
}

impl MulAssign<f64> for Vec2 {
    #[track_caller]
    fn mul_assign(&mut self, rhs: f64) {
        self.scale_mut(rhs);
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
