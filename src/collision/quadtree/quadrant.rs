use crate::collision::AABB;

/// Index of a quadrant inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuadrantId(pub(crate) u32);

impl QuadrantId {
    /// The root quadrant always occupies the first slot.
    pub const ROOT: QuadrantId = QuadrantId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An entity stored in a leaf, with the bounds it was last inserted or updated with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<E> {
    pub entity: E,
    pub bounds: AABB,
}

#[derive(Debug, Clone)]
pub(crate) enum Node<E> {
    Leaf(Vec<Entry<E>>),
    /// Children indexed `x + 2 * y`, `x`/`y` being 0 for the lower half.
    Internal([QuadrantId; 4]),
}

/// A node of the quadtree: a leaf holding entries or an internal node with
/// exactly four children, never both.
#[derive(Debug, Clone)]
pub struct Quadrant<E> {
    pub(crate) bounds: AABB,
    pub(crate) depth: u32,
    pub(crate) parent: Option<QuadrantId>,
    pub(crate) node: Node<E>,
    pub(crate) live: bool,
}

impl<E> Quadrant<E> {
    pub(crate) fn leaf(bounds: AABB, depth: u32, parent: Option<QuadrantId>) -> Self {
        Quadrant {
            bounds,
            depth,
            parent,
            node: Node::Leaf(Vec::new()),
            live: true,
        }
    }

    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// `None` for the root.
    pub fn parent(&self) -> Option<QuadrantId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    pub fn children(&self) -> Option<[QuadrantId; 4]> {
        match self.node {
            Node::Internal(children) => Some(children),
            Node::Leaf(_) => None,
        }
    }

    /// Entries of a leaf. Internal quadrants hold none.
    pub fn entries(&self) -> &[Entry<E>] {
        match &self.node {
            Node::Leaf(entries) => entries,
            Node::Internal(_) => &[],
        }
    }

    pub(crate) fn entries_mut(&mut self) -> Option<&mut Vec<Entry<E>>> {
        match &mut self.node {
            Node::Leaf(entries) => Some(entries),
            Node::Internal(_) => None,
        }
    }

    /// The four equal sub-regions, split at the centre and indexed `x + 2 * y`.
    pub(crate) fn child_bounds(&self) -> [AABB; 4] {
        let b = &self.bounds;
        let half_width = b.width / 2.0;
        let half_height = b.height / 2.0;
        let mut out = [AABB::default(); 4];
        for x in 0..2 {
            let min_x = if x == 0 { b.x } else { b.center_x() };
            for y in 0..2 {
                let min_y = if y == 0 { b.y } else { b.center_y() };
                out[x + y * 2] = AABB::new(min_x, min_y, half_width, half_height);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_bounds_layout() {
        let quadrant: Quadrant<u32> = Quadrant::leaf(AABB::new(0.0, 0.0, 8.0, 4.0), 0, None);
        let children = quadrant.child_bounds();
        assert_eq!(children[0], AABB::new(0.0, 0.0, 4.0, 2.0));
        assert_eq!(children[1], AABB::new(4.0, 0.0, 4.0, 2.0));
        assert_eq!(children[2], AABB::new(0.0, 2.0, 4.0, 2.0));
        assert_eq!(children[3], AABB::new(4.0, 2.0, 4.0, 2.0));
    }

    #[test]
    fn test_leaf_accessors() {
        let quadrant: Quadrant<u32> = Quadrant::leaf(AABB::new(0.0, 0.0, 1.0, 1.0), 2, Some(QuadrantId(7)));
        assert!(quadrant.is_leaf());
        assert!(quadrant.children().is_none());
        assert!(quadrant.entries().is_empty());
        assert_eq!(quadrant.parent(), Some(QuadrantId(7)));
        assert_eq!(quadrant.depth(), 2);
    }
}
