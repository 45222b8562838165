// Defines an Axis-Aligned Bounding Box

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum corner and its extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AABB {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AABB {
    /// Creates a new AABB from its minimum corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        AABB { x, y, width, height }
    }

    /// Creates an AABB spanning two corner points, in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min_x = a.x().min(b.x());
        let min_y = a.y().min(b.y());
        AABB::new(min_x, min_y, a.x().max(b.x()) - min_x, a.y().max(b.y()) - min_y)
    }

    /// Creates an AABB centred on `center` with the given half extents.
    pub fn from_center(center: Vec2, half_width: f64, half_height: f64) -> Self {
        AABB::new(
            center.x() - half_width,
            center.y() - half_height,
            half_width * 2.0,
            half_height * 2.0,
        )
    }

    /// Creates an AABB that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut aabb = AABB::empty();
        for point in points {
            aabb.extend(point.x(), point.y());
        }
        Some(aabb)
    }

    /// The empty sentinel: the first `extend` collapses it onto the given point.
    pub const fn empty() -> Self {
        AABB::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
    }

    /// Resets this box to the empty sentinel for incremental accumulation.
    pub fn inf(&mut self) {
        *self = AABB::empty();
    }

    pub fn clear(&mut self) {
        *self = AABB::default();
    }

    pub fn is_empty(&self) -> bool {
        self.width < 0.0 || self.height < 0.0
    }

    /// A box is valid when it encloses a positive area.
    pub fn valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        if self.is_empty() {
            return;
        }
        self.x += dx;
        self.y += dy;
    }

    /// Grows the box to cover the point `(x, y)`.
    pub fn extend(&mut self, x: f64, y: f64) {
        if self.is_empty() {
            *self = AABB::new(x, y, 0.0, 0.0);
            return;
        }
        let min_x = self.x.min(x);
        let min_y = self.y.min(y);
        let max_x = self.right().max(x);
        let max_y = self.top().max(y);
        *self = AABB::new(min_x, min_y, max_x - min_x, max_y - min_y);
    }

    /// Adds to the box dimensions, keeping the minimum corner fixed.
    pub fn expand(&mut self, width: f64, height: f64) {
        self.width += width;
        self.height += height;
    }

    /// Merges another AABB into this one, expanding this AABB to contain both.
    pub fn merge(&mut self, other: &AABB) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.top().max(other.top());
        *self = AABB::new(min_x, min_y, max_x - min_x, max_y - min_y);
    }

    /// Checks if this AABB overlaps with another AABB. Touching edges do not count.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// Whether `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &AABB) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && y >= self.y && x <= self.right() && y <= self.top()
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        assert!(AABB::new(0.0, 0.0, 1.0, 1.0).valid());
        assert!(!AABB::new(0.0, 0.0, 0.0, 1.0).valid());
        assert!(!AABB::new(0.0, 0.0, 1.0, -1.0).valid());
        assert!(!AABB::empty().valid());
    }

    #[test]
    fn test_intersects_is_half_open() {
        let a = AABB::new(0.0, 0.0, 1.0, 1.0);
        let touching = AABB::new(1.0, 0.0, 1.0, 1.0);
        let overlapping = AABB::new(0.5, 0.5, 1.0, 1.0);
        assert!(!a.intersects(&touching));
        assert!(!touching.intersects(&a));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let outer = AABB::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains(&outer));
        assert!(outer.contains(&AABB::new(5.0, 5.0, 5.0, 5.0)));
        assert!(!outer.contains(&AABB::new(5.0, 5.0, 5.1, 5.0)));
        assert!(outer.contains_point(10.0, 0.0));
        assert!(!outer.contains_point(10.1, 0.0));
    }

    #[test]
    fn test_inf_then_extend() {
        let mut aabb = AABB::new(3.0, 3.0, 1.0, 1.0);
        aabb.inf();
        assert!(aabb.is_empty());
        aabb.extend(-4.0, -2.0);
        assert_eq!(aabb, AABB::new(-4.0, -2.0, 0.0, 0.0));
        aabb.extend(-1.0, 3.0);
        assert_eq!(aabb, AABB::new(-4.0, -2.0, 3.0, 5.0));
    }

    #[test]
    fn test_merge_and_from_points() {
        let mut a = AABB::new(0.0, 0.0, 1.0, 1.0);
        a.merge(&AABB::new(2.0, -1.0, 1.0, 1.0));
        assert_eq!(a, AABB::new(0.0, -1.0, 3.0, 2.0));

        let points = [Vec2::new(1.0, 5.0), Vec2::new(-1.0, 2.0), Vec2::new(0.0, 3.0)];
        assert_eq!(AABB::from_points(&points), Some(AABB::new(-1.0, 2.0, 2.0, 3.0)));
        assert_eq!(AABB::from_points(&[]), None);
    }

    #[test]
    fn test_from_corners_orders_points() {
        let aabb = AABB::from_corners(Vec2::new(4.0, 1.0), Vec2::new(1.0, 3.0));
        assert_eq!(aabb, AABB::new(1.0, 1.0, 3.0, 2.0));
        assert_eq!(aabb.center(), Vec2::new(2.5, 2.0));
    }
}
