pub mod aabb;
pub mod detection;
pub mod manifold;
pub mod quadtree;
pub mod resolution;

// Re-export key types
pub use aabb::AABB;
pub use detection::mtv;
pub use manifold::contact_points;
pub use quadtree::{Quadtree, QuadtreeConfig};
