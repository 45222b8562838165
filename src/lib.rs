//! Impulse-based 2D rigid-body physics for convex polygons.
//!
//! A [`World`] owns the bodies and a quadtree broad phase; an [`Engine`]
//! steps it by integrating motion, finding overlapping pairs, and resolving
//! them with impulses and positional correction.

pub mod collision;
pub mod common;
pub mod error;
pub mod events;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{Quadtree, QuadtreeConfig, AABB};
pub use common::Material;
pub use error::{MathError, PhysicsError, QuadtreeError};
pub use events::{EventAggregator, EventHandler, HandlerId};
pub use math::vec2::Vec2;
pub use objects::{Body, BodyDefinition, BodyHandle, BodyType};
pub use shapes::{Circle, Polygon};
pub use world::{Engine, EngineConfig, World};
