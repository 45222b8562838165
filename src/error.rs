//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised by the math primitives.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MathError {
    /// Attempted to change the components of a frozen vector.
    #[error("cannot modify a frozen vector")]
    FrozenVector,
}

/// Errors raised by the quadtree when given bad configuration or input.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum QuadtreeError {
    /// The tree region must have a positive width and height.
    #[error("quadtree bounds must be valid, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
    /// `min_entities` must be above zero and below `max_entities`.
    #[error("minimum entities ({min}) must be above zero and less than the maximum ({max})")]
    InvalidThresholds { min: usize, max: usize },
    /// Entity bounds passed to insert/update must have a positive area.
    #[error("entity bounds must be valid, got {width}x{height}")]
    InvalidEntityBounds { width: f64, height: f64 },
}

/// Errors raised while building bodies or stepping a world.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    #[error(transparent)]
    Quadtree(#[from] QuadtreeError),
    /// Collision polygons need at least three vertices.
    #[error("body shape must have at least 3 vertices, got {vertices}")]
    InvalidShape { vertices: usize },
    #[error("body mass must be positive, got {0}")]
    InvalidMass(f64),
    #[error("body inertia must be non-negative, got {0}")]
    InvalidInertia(f64),
}
