use crate::collision::AABB;
use crate::math::vec2::Vec2;

/// A convex polygon defined by its vertices in world space.
///
/// Vertices should be ordered counter-clockwise (or clockwise, consistently).
/// The bounding box, edge normals, signed area and centroid are cached and
/// recomputed by every mutating method, so they never go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
    aabb: AABB,
    area: f64,
    centroid: Vec2,
}

impl Default for Polygon {
    fn default() -> Self {
        Polygon::new(Vec::new())
    }
}

impl Polygon {
    /// Creates a new polygon from a vector of vertices.
    /// Fewer than 3 vertices produce an invalid (but usable) polygon.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        let mut polygon = Polygon {
            vertices,
            normals: Vec::new(),
            aabb: AABB::empty(),
            area: 0.0,
            centroid: Vec2::new(0.0, 0.0),
        };
        polygon.update();
        polygon
    }

    /// Axis-aligned rectangle centred on `center`, wound counter-clockwise.
    pub fn rectangle(center: Vec2, width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Polygon::new(vec![
            center + Vec2::new(-hw, -hh),
            center + Vec2::new(hw, -hh),
            center + Vec2::new(hw, hh),
            center + Vec2::new(-hw, hh),
        ])
    }

    /// Regular polygon with `sides` vertices on a circle of `radius`.
    pub fn regular(center: Vec2, radius: f64, sides: usize) -> Self {
        let step = std::f64::consts::TAU / sides as f64;
        Polygon::new(
            (0..sides)
                .map(|i| center + Vec2::new(radius, 0.0).rotate(step * i as f64))
                .collect(),
        )
    }

    pub fn set(&mut self, vertices: Vec<Vec2>) {
        self.vertices = vertices;
        self.update();
    }

    pub fn push(&mut self, vertex: Vec2) {
        self.vertices.push(vertex);
        self.update();
    }

    /// Inserts vertices before `index`. Returns `false` if `index` is past the end.
    pub fn insert(&mut self, index: usize, vertices: &[Vec2]) -> bool {
        if index > self.vertices.len() {
            return false;
        }
        self.vertices.splice(index..index, vertices.iter().copied());
        self.update();
        true
    }

    /// Removes the vertex at `index`. Returns `false` if there is no such vertex.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.vertices.len() {
            return false;
        }
        self.vertices.remove(index);
        self.update();
        true
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.update();
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        let offset = Vec2::new(dx, dy);
        for vertex in self.vertices.iter_mut() {
            *vertex = *vertex + offset;
        }
        // Translation keeps area and normals; shift the positional caches.
        self.aabb.translate(dx, dy);
        self.centroid = self.centroid + offset;
    }

    /// Scales about `origin`, defaulting to the centroid.
    pub fn scale(&mut self, factor: f64, origin: Option<Vec2>) {
        let origin = origin.unwrap_or(self.centroid);
        for vertex in self.vertices.iter_mut() {
            *vertex = origin + (*vertex - origin) * factor;
        }
        self.update();
    }

    /// Rotates by `degrees` about `origin`, defaulting to the centroid.
    pub fn rotate(&mut self, degrees: f64, origin: Option<Vec2>) {
        let origin = origin.unwrap_or(self.centroid);
        let radians = degrees.to_radians();
        for vertex in self.vertices.iter_mut() {
            *vertex = vertex.rotate_about(origin, radians);
        }
        self.update();
    }

    /// Reverses the winding order.
    pub fn rewind(&mut self) {
        self.vertices.reverse();
        self.update();
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Outward unit normal of the edge from vertex `i` to vertex `i + 1`.
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn aabb(&self) -> &AABB {
        &self.aabb
    }

    /// Signed area: positive for counter-clockwise winding.
    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    pub fn valid(&self) -> bool {
        self.vertices.len() > 2
    }

    /// Projects every vertex onto `axis`, returning `(min, max)`.
    pub fn project(&self, axis: Vec2) -> (f64, f64) {
        let mut min_proj = f64::INFINITY;
        let mut max_proj = f64::NEG_INFINITY;
        for vertex in &self.vertices {
            let projection = vertex.dot(axis);
            min_proj = min_proj.min(projection);
            max_proj = max_proj.max(projection);
        }
        (min_proj, max_proj)
    }

    /// Even-odd point containment.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        if !self.valid() || !self.aabb.contains_point(x, y) {
            return false;
        }
        let mut inside = false;
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + n - 1) % n];
            let crosses = (a.y() > y) != (b.y() > y);
            if crosses && x < (b.x() - a.x()) * (y - a.y()) / (b.y() - a.y()) + a.x() {
                inside = !inside;
            }
        }
        inside
    }

    /// Whether every vertex of `other` lies within this polygon.
    pub fn contains(&self, other: &Polygon) -> bool {
        if !self.aabb.contains(&other.aabb) {
            return false;
        }
        other.vertices.iter().all(|v| self.contains_point(v.x(), v.y()))
    }

    /// Cheap overlap check: at least one vertex of `other` lies inside this polygon.
    /// Use the SAT in `collision::detection` for an exact test.
    pub fn intersects(&self, other: &Polygon) -> bool {
        if !self.aabb.intersects(&other.aabb) {
            return false;
        }
        other.vertices.iter().any(|v| self.contains_point(v.x(), v.y()))
    }

    /// Moment of inertia about the local origin for a body of `mass`,
    /// from the cross-product weighted triangle fan.
    pub fn moment_of_inertia(&self, mass: f64) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];
            let cross_prod = v2.cross(v1).abs();

            numerator += cross_prod * (v2.dot(v2) + v2.dot(v1) + v1.dot(v1));
            denominator += cross_prod;
        }
        if denominator < 1e-12 {
            return 0.0;
        }
        (mass / 6.0) * (numerator / denominator)
    }

    fn update(&mut self) {
        self.aabb.inf();
        self.normals.clear();
        self.area = 0.0;
        self.centroid = Vec2::new(0.0, 0.0);

        let n = self.vertices.len();
        if n < 3 {
            if let Some(aabb) = AABB::from_points(&self.vertices) {
                self.aabb = aabb;
                self.centroid = self.average_vertex();
            }
            return;
        }

        let origin = self.vertices[0];
        let mut weighted = Vec2::new(0.0, 0.0);
        let mut signed_area_sum = 0.0;

        for i in 0..n {
            let v = self.vertices[i];
            self.aabb.extend(v.x(), v.y());

            if i >= 1 && i + 1 < n {
                let v3 = self.vertices[i + 1];
                let triangle_signed_area = (v - origin).cross(v3 - origin) / 2.0;
                signed_area_sum += triangle_signed_area;
                weighted += (origin + v + v3) / 3.0 * triangle_signed_area;
            }
        }
        self.area = signed_area_sum;

        // For clockwise winding the right-hand perpendicular points inwards.
        let winding = if signed_area_sum < 0.0 { -1.0 } else { 1.0 };
        for i in 0..n {
            let edge = self.vertices[(i + 1) % n] - self.vertices[i];
            let normal = Vec2::new(edge.y(), -edge.x()).normalize() * winding;
            self.normals.push(normal);
        }

        self.centroid = if signed_area_sum.abs() < 1e-10 {
            // Degenerate case (e.g., collinear vertices)
            self.average_vertex()
        } else {
            weighted / signed_area_sum
        };
    }

    fn average_vertex(&self) -> Vec2 {
        if self.vertices.is_empty() {
            return Vec2::new(0.0, 0.0);
        }
        let mut avg = Vec2::new(0.0, 0.0);
        for v in &self.vertices {
            avg += *v;
        }
        avg / self.vertices.len() as f64
    }
}
