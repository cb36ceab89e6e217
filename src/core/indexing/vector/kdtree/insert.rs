// src/core/indexing/vector/kdtree/insert.rs

//! Incremental insertion into a KD-Tree.

use super::error::KdTreeError;
use super::tree::{KdNode, KdTree};

impl<I> KdTree<I> {
    /// Inserts a point with an optional identifier.
    ///
    /// The point descends from the root: at depth `d` it compares coordinate
    /// `d % dimension` with the node's and goes left when strictly smaller,
    /// right otherwise, until it reaches an empty slot. Existing nodes are
    /// never overwritten, so inserting the same point twice stores it twice.
    ///
    /// Runs in O(depth); nothing rebalances the tree.
    ///
    /// # Errors
    ///
    /// * `KdTreeError::DimensionMismatch` if the point's length differs from the tree's dimensionality.
    /// * `KdTreeError::ZeroDimension` if the point has no coordinates.
    ///
    /// The tree is left untouched when an error is returned.
    pub fn insert(&mut self, point: Vec<f64>, id: Option<I>) -> Result<(), KdTreeError> {
        let dimension = match self.dimension {
            Some(expected) if expected != point.len() => {
                tracing::warn!(expected, found = point.len(), "rejected KD-tree insert");
                return Err(KdTreeError::DimensionMismatch { expected, found: point.len() });
            }
            _ if point.is_empty() => return Err(KdTreeError::ZeroDimension),
            _ => point.len(),
        };

        let mut slot = &mut self.root;
        let mut depth = 0usize;
        while let Some(node) = slot {
            let axis = depth % dimension;
            slot = if point[axis] < node.point[axis] { &mut node.left } else { &mut node.right };
            depth += 1;
        }
        *slot = Some(Box::new(KdNode::new(point, id)));

        self.dimension = Some(dimension);
        self.len += 1;
        tracing::trace!(depth, len = self.len, "inserted KD-tree point");
        Ok(())
    }
}
