//! Region quadtree used as the broad-phase spatial index.
//!
//! Quadrants live in an arena addressed by [`QuadrantId`]. Entities that
//! straddle quadrant boundaries are stored in every leaf they intersect, and a
//! [`QuadtreeMap`] tracks those leaves so removal and updates never search the
//! whole tree.

pub mod config;
pub mod map;
pub mod quadrant;

pub use config::QuadtreeConfig;
pub use map::QuadtreeMap;
pub use quadrant::{Entry, Quadrant, QuadrantId};

use std::hash::Hash;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::collision::AABB;
use crate::error::QuadtreeError;
use quadrant::Node;

/// A mutable multimap from 2D regions to entity handles.
#[derive(Debug, Clone)]
pub struct Quadtree<E> {
    config: QuadtreeConfig,
    quadrants: Vec<Quadrant<E>>,
    free: Vec<QuadrantId>,
    map: QuadtreeMap<E>,
}

impl<E: Copy + Eq + Hash> Quadtree<E> {
    /// Creates an empty tree covering `config.bounds`.
    pub fn new(config: QuadtreeConfig) -> Result<Self, QuadtreeError> {
        config.validate()?;
        Ok(Quadtree {
            quadrants: vec![Quadrant::leaf(config.bounds, 0, None)],
            config,
            free: Vec::new(),
            map: QuadtreeMap::new(),
        })
    }

    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    pub fn root(&self) -> &Quadrant<E> {
        &self.quadrants[QuadrantId::ROOT.index()]
    }

    /// Looks up a live quadrant.
    pub fn quadrant(&self, id: QuadrantId) -> Option<&Quadrant<E>> {
        self.quadrants.get(id.index()).filter(|q| q.live)
    }

    /// Iterates over every live leaf quadrant.
    pub fn leaves(&self) -> impl Iterator<Item = (QuadrantId, &Quadrant<E>)> + '_ {
        self.quadrants
            .iter()
            .enumerate()
            .filter(|(_, q)| q.live && q.is_leaf())
            .map(|(i, q)| (QuadrantId(i as u32), q))
    }

    pub fn map(&self) -> &QuadtreeMap<E> {
        &self.map
    }

    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, entity: E) -> bool {
        self.map.contains(entity)
    }

    /// The bounds an entity was last inserted or updated with.
    pub fn bounds_of(&self, entity: E) -> Option<AABB> {
        let leaf = *self.map.get(entity)?.first()?;
        self.quadrants[leaf.index()]
            .entries()
            .iter()
            .find(|e| e.entity == entity)
            .map(|e| e.bounds)
    }

    /// Adds `entity` to every leaf its bounds intersect.
    ///
    /// Bounds outside the tree region are silently dropped; inserting an
    /// entity a leaf already holds does nothing.
    pub fn insert(&mut self, entity: E, bounds: AABB) -> Result<(), QuadtreeError> {
        check_bounds(&bounds)?;
        self.insert_at(QuadrantId::ROOT, entity, bounds);
        Ok(())
    }

    /// Removes `entity` from the tree, collapsing quadrants that fall below
    /// the minimum. Returns whether the entity was tracked.
    pub fn remove(&mut self, entity: E) -> bool {
        let Some(leaves) = self.map.take(entity) else {
            return false;
        };

        let mut parents = Vec::new();
        for leaf in leaves {
            if let Some(parent) = self.detach(leaf, entity) {
                if !parents.contains(&parent) {
                    parents.push(parent);
                }
            }
        }
        for parent in parents {
            self.bubble_collapse(parent);
        }
        true
    }

    /// Replaces the stored bounds of `entity` (or keeps them when `None`) and
    /// moves it to the leaves matching those bounds. Returns whether the
    /// entity was tracked.
    pub fn update(&mut self, entity: E, new_bounds: Option<AABB>) -> Result<bool, QuadtreeError> {
        if let Some(bounds) = &new_bounds {
            check_bounds(bounds)?;
        }
        let Some(leaves) = self.map.get(entity).map(<[QuadrantId]>::to_vec) else {
            return Ok(false);
        };
        let Some(bounds) = new_bounds.or_else(|| self.bounds_of(entity)) else {
            return Ok(false);
        };

        for leaf in &leaves {
            if let Some(entries) = self.quadrants[leaf.index()].entries_mut() {
                for entry in entries.iter_mut().filter(|e| e.entity == entity) {
                    entry.bounds = bounds;
                }
            }
        }

        if leaves
            .iter()
            .all(|leaf| self.quadrants[leaf.index()].bounds.contains(&bounds))
        {
            return Ok(true);
        }

        let mut parents = Vec::new();
        for leaf in leaves {
            if self.quadrants[leaf.index()].bounds.intersects(&bounds) {
                continue;
            }
            self.map.remove(entity, leaf);
            if let Some(parent) = self.detach(leaf, entity) {
                if !parents.contains(&parent) {
                    parents.push(parent);
                }
            }
        }
        for parent in parents {
            self.bubble_collapse(parent);
        }

        let start = self.deepest_containing(&bounds);
        self.insert_at(start, entity, bounds);
        Ok(true)
    }

    /// Entities sharing a leaf with `entity` whose bounds overlap it, without
    /// duplicates and excluding `entity` itself.
    pub fn intersections(&self, entity: E) -> Vec<E> {
        let mut found = Vec::new();
        let Some(leaves) = self.map.get(entity) else {
            return found;
        };

        let mut seen = FxHashSet::default();
        for leaf in leaves {
            let entries = self.quadrants[leaf.index()].entries();
            let Some(own) = entries.iter().find(|e| e.entity == entity) else {
                continue;
            };
            for other in entries {
                if other.entity == entity || !own.bounds.intersects(&other.bounds) {
                    continue;
                }
                if seen.insert(other.entity) {
                    found.push(other.entity);
                }
            }
        }
        found
    }

    /// Entities whose stored bounds overlap `region`.
    pub fn query(&self, region: &AABB) -> Vec<E> {
        let mut found = Vec::new();
        let mut seen = FxHashSet::default();
        let mut stack = vec![QuadrantId::ROOT];

        while let Some(id) = stack.pop() {
            let quadrant = &self.quadrants[id.index()];
            if !quadrant.bounds.intersects(region) {
                continue;
            }
            match &quadrant.node {
                Node::Internal(children) => stack.extend(children.iter().rev()),
                Node::Leaf(entries) => {
                    for entry in entries {
                        if entry.bounds.intersects(region) && seen.insert(entry.entity) {
                            found.push(entry.entity);
                        }
                    }
                }
            }
        }
        found
    }

    /// Drops every entity and quadrant, leaving an empty root leaf.
    pub fn clear(&mut self) {
        self.quadrants.clear();
        self.quadrants.push(Quadrant::leaf(self.config.bounds, 0, None));
        self.free.clear();
        self.map.clear();
    }

    fn insert_at(&mut self, id: QuadrantId, entity: E, bounds: AABB) {
        let quadrant = &self.quadrants[id.index()];
        if !quadrant.bounds.intersects(&bounds) {
            return;
        }

        let depth = quadrant.depth;
        let (held, count) = match &quadrant.node {
            Node::Internal(children) => {
                let children = *children;
                for child in children {
                    self.insert_at(child, entity, bounds);
                }
                return;
            }
            Node::Leaf(entries) => (entries.iter().any(|e| e.entity == entity), entries.len()),
        };
        if held {
            return;
        }

        if count + 1 > self.config.max_entities && depth < self.config.max_depth {
            let mut entries = self.subdivide(id);
            entries.push(Entry { entity, bounds });
            for entry in entries {
                self.insert_at(id, entry.entity, entry.bounds);
            }
            return;
        }

        if let Some(entries) = self.quadrants[id.index()].entries_mut() {
            entries.push(Entry { entity, bounds });
        }
        self.map.insert(entity, id);
    }

    /// Turns leaf `id` into an internal quadrant with four empty children and
    /// returns the entries it held, already unregistered from the map.
    fn subdivide(&mut self, id: QuadrantId) -> Vec<Entry<E>> {
        let quadrant = &self.quadrants[id.index()];
        let depth = quadrant.depth + 1;
        let regions = quadrant.child_bounds();

        let mut children = [QuadrantId::ROOT; 4];
        for (slot, region) in children.iter_mut().zip(regions) {
            *slot = self.allocate(Quadrant::leaf(region, depth, Some(id)));
        }

        let entries = match std::mem::replace(&mut self.quadrants[id.index()].node, Node::Internal(children)) {
            Node::Leaf(entries) => entries,
            Node::Internal(_) => Vec::new(),
        };
        for entry in &entries {
            self.map.remove(entry.entity, id);
        }

        debug!(quadrant = id.0, depth, entries = entries.len(), "subdivided quadrant");
        entries
    }

    /// Walks up from `start`, merging internal quadrants whose distinct
    /// entity count dropped below the minimum back into leaves.
    fn bubble_collapse(&mut self, start: QuadrantId) {
        let mut current = Some(start);
        while let Some(id) = current {
            let quadrant = &self.quadrants[id.index()];
            // Already merged into a collapsed ancestor.
            if !quadrant.live {
                return;
            }
            if !quadrant.is_leaf() {
                let entries = self.accumulate(id);
                if entries.len() >= self.config.min_entities {
                    return;
                }
                self.collapse(id, entries);
            }
            current = self.quadrants[id.index()].parent;
        }
    }

    fn collapse(&mut self, id: QuadrantId, entries: Vec<Entry<E>>) {
        let Some(children) = self.quadrants[id.index()].children() else {
            return;
        };
        for child in children {
            self.release(child);
        }

        for entry in &entries {
            self.map.insert(entry.entity, id);
        }
        debug!(quadrant = id.0, entries = entries.len(), "collapsed quadrant");
        self.quadrants[id.index()].node = Node::Leaf(entries);
    }

    /// Frees `id` and its descendants, unregistering their entries.
    fn release(&mut self, id: QuadrantId) {
        let node = std::mem::replace(&mut self.quadrants[id.index()].node, Node::Leaf(Vec::new()));
        match node {
            Node::Internal(children) => {
                for child in children {
                    self.release(child);
                }
            }
            Node::Leaf(entries) => {
                for entry in entries {
                    self.map.remove(entry.entity, id);
                }
            }
        }
        self.quadrants[id.index()].live = false;
        self.free.push(id);
    }

    /// Unique entries across the leaves below `id`, first occurrence wins.
    fn accumulate(&self, id: QuadrantId) -> Vec<Entry<E>> {
        let mut entries = Vec::new();
        let mut seen = FxHashSet::default();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match &self.quadrants[current.index()].node {
                Node::Internal(children) => stack.extend(children.iter().rev()),
                Node::Leaf(leaf_entries) => {
                    for entry in leaf_entries {
                        if seen.insert(entry.entity) {
                            entries.push(*entry);
                        }
                    }
                }
            }
        }
        entries
    }

    /// Removes `entity` from leaf `id`, returning the leaf's parent.
    fn detach(&mut self, id: QuadrantId, entity: E) -> Option<QuadrantId> {
        let quadrant = &mut self.quadrants[id.index()];
        if let Some(entries) = quadrant.entries_mut() {
            entries.retain(|e| e.entity != entity);
        }
        quadrant.parent
    }

    fn deepest_containing(&self, bounds: &AABB) -> QuadrantId {
        let mut current = QuadrantId::ROOT;
        loop {
            let Some(children) = self.quadrants[current.index()].children() else {
                return current;
            };
            match children
                .into_iter()
                .find(|c| self.quadrants[c.index()].bounds.contains(bounds))
            {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    fn allocate(&mut self, quadrant: Quadrant<E>) -> QuadrantId {
        match self.free.pop() {
            Some(id) => {
                self.quadrants[id.index()] = quadrant;
                id
            }
            None => {
                self.quadrants.push(quadrant);
                QuadrantId((self.quadrants.len() - 1) as u32)
            }
        }
    }
}

fn check_bounds(bounds: &AABB) -> Result<(), QuadtreeError> {
    if bounds.valid() {
        Ok(())
    } else {
        Err(QuadtreeError::InvalidEntityBounds {
            width: bounds.width,
            height: bounds.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Quadtree<u32> {
        Quadtree::new(QuadtreeConfig::new(AABB::new(0.0, 0.0, 16.0, 16.0))).unwrap()
    }

    fn cell(x: f64, y: f64) -> AABB {
        AABB::new(x, y, 1.0, 1.0)
    }

    /// Every map record points at a live leaf holding the entity and every
    /// leaf entry is recorded in the map.
    fn assert_consistent(tree: &Quadtree<u32>) {
        for (entity, leaves) in tree.map().iter() {
            assert!(!leaves.is_empty());
            for leaf in leaves {
                let quadrant = tree.quadrant(*leaf).expect("live quadrant");
                assert!(quadrant.is_leaf());
                assert!(quadrant.entries().iter().any(|e| e.entity == entity));
            }
        }
        for (id, leaf) in tree.leaves() {
            for entry in leaf.entries() {
                assert!(tree.map().get(entry.entity).unwrap().contains(&id));
            }
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let bad = QuadtreeConfig::new(AABB::new(0.0, 0.0, -1.0, 1.0));
        assert!(Quadtree::<u32>::new(bad).is_err());
        let bad = QuadtreeConfig::new(AABB::new(0.0, 0.0, 1.0, 1.0)).with_thresholds(3, 3);
        assert!(Quadtree::<u32>::new(bad).is_err());
    }

    #[test]
    fn test_insert_rejects_invalid_bounds() {
        let mut tree = tree();
        assert_eq!(
            tree.insert(1, AABB::new(0.0, 0.0, 0.0, 1.0)),
            Err(QuadtreeError::InvalidEntityBounds { width: 0.0, height: 1.0 })
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn test_insert_outside_is_dropped() {
        let mut tree = tree();
        tree.insert(1, cell(20.0, 20.0)).unwrap();
        assert!(!tree.contains(1));
        // Touching the edge does not intersect either.
        tree.insert(2, cell(16.0, 0.0)).unwrap();
        assert!(!tree.contains(2));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut tree = tree();
        tree.insert(1, cell(1.0, 1.0)).unwrap();
        tree.insert(1, cell(1.0, 1.0)).unwrap();
        assert_eq!(tree.root().entries().len(), 1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_subdivides_past_max_entities() {
        let mut tree = tree();
        for (i, (x, y)) in [(1.0, 1.0), (10.0, 1.0), (1.0, 10.0), (10.0, 10.0)].iter().enumerate() {
            tree.insert(i as u32, cell(*x, *y)).unwrap();
        }
        assert!(tree.root().is_leaf());

        tree.insert(4, cell(2.0, 2.0)).unwrap();
        let children = tree.root().children().unwrap();
        let lower_left = tree.quadrant(children[0]).unwrap();
        assert_eq!(lower_left.entries().len(), 2);
        assert_eq!(lower_left.depth(), 1);
        assert_eq!(tree.quadrant(children[1]).unwrap().entries()[0].entity, 1);
        assert_eq!(tree.quadrant(children[2]).unwrap().entries()[0].entity, 2);
        assert_eq!(tree.quadrant(children[3]).unwrap().entries()[0].entity, 3);
        assert_consistent(&tree);
    }

    #[test]
    fn test_straddling_entity_lives_in_every_leaf() {
        let mut tree = tree();
        for i in 0..4 {
            tree.insert(i, cell(i as f64, 0.0)).unwrap();
        }
        tree.insert(9, AABB::new(7.0, 7.0, 2.0, 2.0)).unwrap();
        assert_eq!(tree.map().get(9).unwrap().len(), 4);
        assert_consistent(&tree);
    }

    #[test]
    fn test_depth_is_bounded() {
        let config = QuadtreeConfig::new(AABB::new(0.0, 0.0, 16.0, 16.0)).with_max_depth(2);
        let mut tree = Quadtree::new(config).unwrap();
        for i in 0..10 {
            tree.insert(i, AABB::new(0.1, 0.1, 0.5, 0.5)).unwrap();
        }
        assert!(tree.leaves().all(|(_, leaf)| leaf.depth() <= 2));
        let crowded = tree.leaves().find(|(_, leaf)| leaf.entries().len() == 10);
        assert_eq!(crowded.map(|(_, leaf)| leaf.depth()), Some(2));
        assert_consistent(&tree);
    }

    #[test]
    fn test_remove_collapses_back_to_root() {
        let mut tree = tree();
        for i in 0..8 {
            tree.insert(i, cell((i * 2) as f64, (i * 2) as f64)).unwrap();
        }
        assert!(!tree.root().is_leaf());

        for i in 0..6 {
            assert!(tree.remove(i));
            assert_consistent(&tree);
        }
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().entries().len(), 2);
        assert!(!tree.remove(0));
    }

    #[test]
    fn test_update_moves_entity() {
        let mut tree = tree();
        for i in 0..5 {
            tree.insert(i, cell(1.0 + i as f64 * 0.1, 1.0)).unwrap();
        }
        tree.insert(5, cell(12.0, 12.0)).unwrap();
        assert!(tree.intersections(5).is_empty());

        assert_eq!(tree.update(5, Some(cell(1.2, 1.2))), Ok(true));
        assert_eq!(tree.bounds_of(5), Some(cell(1.2, 1.2)));
        assert_eq!(tree.intersections(5).len(), 5);
        assert_consistent(&tree);

        assert_eq!(tree.update(42, Some(cell(0.0, 0.0))), Ok(false));
        assert!(tree.update(5, Some(AABB::new(0.0, 0.0, 1.0, 0.0))).is_err());
        assert_eq!(tree.update(5, None), Ok(true));
    }

    #[test]
    fn test_update_outside_root_untracks() {
        let mut tree = tree();
        tree.insert(1, cell(1.0, 1.0)).unwrap();
        assert_eq!(tree.update(1, Some(cell(40.0, 40.0))), Ok(true));
        assert!(!tree.contains(1));
    }

    #[test]
    fn test_intersections_deduplicate_and_exclude_self() {
        let mut tree = tree();
        for i in 0..4 {
            tree.insert(i, cell(i as f64 * 4.0, 0.0)).unwrap();
        }
        tree.insert(10, AABB::new(6.0, 6.0, 4.0, 4.0)).unwrap();
        tree.insert(11, AABB::new(7.0, 7.0, 2.0, 2.0)).unwrap();

        // Both span all four children of the root.
        assert_eq!(tree.intersections(10), vec![11]);
        assert_eq!(tree.intersections(11), vec![10]);
        assert!(tree.intersections(0).is_empty());
        assert!(tree.intersections(99).is_empty());
    }

    #[test]
    fn test_query_region() {
        let mut tree = tree();
        for i in 0..6 {
            tree.insert(i, cell(i as f64 * 2.5, i as f64 * 2.5)).unwrap();
        }
        let mut found = tree.query(&AABB::new(0.0, 0.0, 4.0, 4.0));
        found.sort();
        assert_eq!(found, vec![0, 1]);
        assert!(tree.query(&AABB::new(20.0, 20.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut tree = tree();
        for i in 0..8 {
            tree.insert(i, cell(i as f64, i as f64)).unwrap();
        }
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.root().is_leaf());
        assert_eq!(tree.leaves().count(), 1);
    }
}
