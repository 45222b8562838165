use std::hash::Hash;

use rustc_hash::FxHashMap;

use super::quadrant::QuadrantId;

/// Reverse index from an entity to every leaf quadrant currently holding it.
#[derive(Debug, Clone)]
pub struct QuadtreeMap<E> {
    map: FxHashMap<E, Vec<QuadrantId>>,
}

impl<E> Default for QuadtreeMap<E> {
    fn default() -> Self {
        QuadtreeMap { map: FxHashMap::default() }
    }
}

impl<E: Copy + Eq + Hash> QuadtreeMap<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `quadrant` holds `entity`. Recording the same pair twice is a no-op.
    pub fn insert(&mut self, entity: E, quadrant: QuadrantId) {
        let quadrants = self.map.entry(entity).or_default();
        if !quadrants.contains(&quadrant) {
            quadrants.push(quadrant);
        }
    }

    /// Forgets one holder of `entity`, dropping the entity once no holders remain.
    pub fn remove(&mut self, entity: E, quadrant: QuadrantId) -> bool {
        let Some(quadrants) = self.map.get_mut(&entity) else {
            return false;
        };
        let Some(index) = quadrants.iter().position(|q| *q == quadrant) else {
            return false;
        };
        quadrants.swap_remove(index);
        if quadrants.is_empty() {
            self.map.remove(&entity);
        }
        true
    }

    /// Removes the entity entirely, returning the quadrants that held it.
    pub fn take(&mut self, entity: E) -> Option<Vec<QuadrantId>> {
        self.map.remove(&entity)
    }

    pub fn get(&self, entity: E) -> Option<&[QuadrantId]> {
        self.map.get(&entity).map(Vec::as_slice)
    }

    pub fn contains(&self, entity: E) -> bool {
        self.map.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (E, &[QuadrantId])> + '_ {
        self.map.iter().map(|(entity, quadrants)| (*entity, quadrants.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut map = QuadtreeMap::new();
        map.insert(1u32, QuadrantId(3));
        map.insert(1u32, QuadrantId(3));
        map.insert(1u32, QuadrantId(4));
        assert_eq!(map.get(1).map(<[_]>::len), Some(2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_last_holder_forgets_entity() {
        let mut map = QuadtreeMap::new();
        map.insert(9u32, QuadrantId(1));
        map.insert(9u32, QuadrantId(2));

        assert!(map.remove(9, QuadrantId(1)));
        assert!(map.contains(9));
        assert!(!map.remove(9, QuadrantId(1)));
        assert!(map.remove(9, QuadrantId(2)));
        assert!(!map.contains(9));
        assert!(map.is_empty());
    }

    #[test]
    fn test_take() {
        let mut map = QuadtreeMap::new();
        map.insert(5u32, QuadrantId(0));
        assert_eq!(map.take(5), Some(vec![QuadrantId(0)]));
        assert_eq!(map.take(5), None);
    }
}
