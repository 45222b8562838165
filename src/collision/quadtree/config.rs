use crate::collision::AABB;
use crate::error::QuadtreeError;

pub const DEFAULT_MIN_ENTITIES: usize = 3;
pub const DEFAULT_MAX_ENTITIES: usize = 4;
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Region and thresholds for a [`Quadtree`](super::Quadtree).
///
/// Thresholds are fixed for the lifetime of a tree: a leaf splits when adding
/// an entry would take it past `max_entities` (unless it already sits at
/// `max_depth`), and an internal quadrant merges back into a leaf once fewer
/// than `min_entities` distinct entities remain below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadtreeConfig {
    pub bounds: AABB,
    pub min_entities: usize,
    pub max_entities: usize,
    pub max_depth: u32,
}

impl QuadtreeConfig {
    pub fn new(bounds: AABB) -> Self {
        QuadtreeConfig {
            bounds,
            min_entities: DEFAULT_MIN_ENTITIES,
            max_entities: DEFAULT_MAX_ENTITIES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_thresholds(mut self, min_entities: usize, max_entities: usize) -> Self {
        self.min_entities = min_entities;
        self.max_entities = max_entities;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), QuadtreeError> {
        if !self.bounds.valid() {
            return Err(QuadtreeError::InvalidBounds {
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        if self.min_entities == 0 || self.min_entities >= self.max_entities {
            return Err(QuadtreeError::InvalidThresholds {
                min: self.min_entities,
                max: self.max_entities,
            });
        }
        Ok(())
    }
}
