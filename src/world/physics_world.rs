use rustc_hash::FxHashMap;
use tracing::debug;

use crate::collision::quadtree::{Quadtree, QuadtreeConfig};
use crate::collision::AABB;
use crate::error::PhysicsError;
use crate::objects::rigid_body::{Body, BodyHandle};

/// Owns the bodies of a simulation and mirrors their bounds in a quadtree.
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<Body>,
    handles: Vec<BodyHandle>,
    index: FxHashMap<BodyHandle, usize>,
    tree: Quadtree<BodyHandle>,
    next_handle: u64,
}

impl World {
    /// Creates an empty world whose spatial index covers `bounds`, using the
    /// default quadtree thresholds.
    pub fn new(bounds: AABB) -> Result<Self, PhysicsError> {
        Self::with_config(QuadtreeConfig::new(bounds))
    }

    pub fn with_config(config: QuadtreeConfig) -> Result<Self, PhysicsError> {
        Ok(World {
            bodies: Vec::new(),
            handles: Vec::new(),
            index: FxHashMap::default(),
            tree: Quadtree::new(config)?,
            next_handle: 0,
        })
    }

    /// Adds a body to the world and returns its handle.
    ///
    /// Bodies outside the world bounds are kept but not indexed, so they
    /// never collide.
    pub fn add(&mut self, body: Body) -> Result<BodyHandle, PhysicsError> {
        let handle = BodyHandle(self.next_handle);
        self.tree.insert(handle, body.aabb())?;
        self.next_handle += 1;

        self.index.insert(handle, self.bodies.len());
        self.bodies.push(body);
        self.handles.push(handle);

        debug!(handle = handle.0, bodies = self.bodies.len(), "added body");
        Ok(handle)
    }

    /// Removes a body. Returns `false` when the handle is unknown.
    pub fn remove(&mut self, handle: BodyHandle) -> bool {
        let Some(i) = self.index.remove(&handle) else {
            return false;
        };
        self.tree.remove(handle);
        self.bodies.remove(i);
        self.handles.remove(i);
        for (offset, h) in self.handles[i..].iter().enumerate() {
            self.index.insert(*h, i + offset);
        }

        debug!(handle = handle.0, bodies = self.bodies.len(), "removed body");
        true
    }

    /// Removes every body.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.handles.clear();
        self.index.clear();
        self.tree.clear();
        debug!("cleared world");
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Handles in the same order as [`World::bodies`].
    pub fn handles(&self) -> &[BodyHandle] {
        &self.handles
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.handles.iter().copied().zip(self.bodies.iter())
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.index.get(&handle).map(|&i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let i = *self.index.get(&handle)?;
        self.bodies.get_mut(i)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.index.contains_key(&handle)
    }

    pub fn tree(&self) -> &Quadtree<BodyHandle> {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub(crate) fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.index.get(&handle).copied()
    }

    pub(crate) fn body_mut(&mut self, i: usize) -> &mut Body {
        &mut self.bodies[i]
    }

    /// Mirrors the current bounds of body `i` into the tree.
    pub(crate) fn reindex(&mut self, i: usize) -> Result<(), PhysicsError> {
        let handle = self.handles[i];
        let bounds = self.bodies[i].aabb();
        if !self.tree.update(handle, Some(bounds))? {
            self.tree.insert(handle, bounds)?;
        }
        Ok(())
    }

    /// Entities overlapping body `i` in the broad phase.
    pub(crate) fn candidates(&self, i: usize) -> Vec<BodyHandle> {
        self.tree.intersections(self.handles[i])
    }

    /// Gets mutable references to two distinct bodies.
    pub(crate) fn pair_mut(&mut self, idx_a: usize, idx_b: usize) -> Option<(&mut Body, &mut Body)> {
        if idx_a == idx_b || idx_a >= self.bodies.len() || idx_b >= self.bodies.len() {
            return None;
        }

        // Ensure a < b for split_at_mut
        if idx_a < idx_b {
            let (slice_a, slice_b) = self.bodies.split_at_mut(idx_b);
            Some((&mut slice_a[idx_a], &mut slice_b[0]))
        } else {
            let (slice_b, slice_a) = self.bodies.split_at_mut(idx_a);
            Some((&mut slice_a[0], &mut slice_b[idx_b]))
        }
    }
}
