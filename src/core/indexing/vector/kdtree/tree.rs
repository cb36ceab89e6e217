// src/core/indexing/vector/kdtree/tree.rs

//! Defines the core KD-Tree structures: `KdNode` and `KdTree`.

use super::error::KdTreeError;

/// Represents a node in the KD-Tree.
///
/// Every node stores exactly one point and the identifier it was inserted
/// with. The splitting axis is not stored: a node at depth `d` splits on
/// `d % dimension`. Children are exclusively owned, so the tree has no
/// shared or back references. Nodes are never modified after creation
/// apart from filling an empty child slot.
#[derive(Debug)]
pub(crate) struct KdNode<I> {
    pub(crate) point: Vec<f64>,
    pub(crate) id: Option<I>,
    pub(crate) left: Option<Box<KdNode<I>>>,
    pub(crate) right: Option<Box<KdNode<I>>>,
}

impl<I> KdNode<I> {
    pub(crate) const fn new(point: Vec<f64>, id: Option<I>) -> Self {
        Self { point, id, left: None, right: None }
    }

    /// Returns `(near, far)` children for a coordinate on `axis`.
    ///
    /// Coordinates strictly below the node's go left; equal ones go right,
    /// matching the insertion rule.
    pub(crate) fn split_children(
        &self,
        coordinate: f64,
        axis: usize,
    ) -> (Option<&Self>, Option<&Self>) {
        if coordinate < self.point[axis] {
            (self.left.as_deref(), self.right.as_deref())
        } else {
            (self.right.as_deref(), self.left.as_deref())
        }
    }
}

/// Represents a KD-Tree.
///
/// Points are added one at a time with [`KdTree::insert`]; there is no
/// deletion and no rebalancing, so depth depends on insertion order.
/// The dimensionality is either fixed up front ([`KdTree::new`]) or taken
/// from the first inserted point ([`KdTree::with_inferred_dimension`]).
#[derive(Debug)]
pub struct KdTree<I> {
    pub(crate) root: Option<Box<KdNode<I>>>,
    pub(crate) dimension: Option<usize>,
    pub(crate) len: usize,
}

impl<I> KdTree<I> {
    /// Creates a new, empty KD-Tree for points with `dimension` coordinates.
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { root: None, dimension: Some(dimension), len: 0 }
    }

    /// Creates an empty tree whose dimensionality is fixed by the first insertion.
    #[must_use]
    pub const fn with_inferred_dimension() -> Self {
        Self { root: None, dimension: None, len: 0 }
    }

    /// Returns the dimensionality of the tree, or `None` if it has not been fixed yet.
    #[must_use]
    pub const fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Number of stored points, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path (0 for an empty tree).
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&KdNode<I>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.left.as_deref().map(|child| (child, level + 1)));
            stack.extend(node.right.as_deref().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Iterates over `(point, id)` pairs in pre-order (node, left subtree, right subtree).
    #[must_use]
    pub fn iter(&self) -> Iter<'_, I> {
        Iter { stack: self.root.as_deref().into_iter().collect() }
    }

    /// Checks a query target against the tree's dimensionality.
    ///
    /// A tree whose dimensionality is still unknown holds no points, so any
    /// target is accepted and the query simply finds nothing.
    pub(crate) fn check_query(&self, target: &[f64]) -> Result<(), KdTreeError> {
        match self.dimension {
            Some(expected) if expected != target.len() => {
                Err(KdTreeError::DimensionMismatch { expected, found: target.len() })
            }
            _ => Ok(()),
        }
    }
}

impl<I> Default for KdTree<I> {
    fn default() -> Self {
        Self::with_inferred_dimension()
    }
}

// Tear down iteratively: a tree built from sorted input is a linked list,
// and the default recursive drop of `Box` chains would overflow the stack.
impl<I> Drop for KdTree<I> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<KdNode<I>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Pre-order iterator over the points of a [`KdTree`].
#[derive(Debug)]
pub struct Iter<'a, I> {
    stack: Vec<&'a KdNode<I>>,
}

impl<'a, I> Iterator for Iter<'a, I> {
    type Item = (&'a [f64], Option<&'a I>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so the left subtree is yielded first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some((node.point.as_slice(), node.id.as_ref()))
    }
}

impl<'a, I> IntoIterator for &'a KdTree<I> {
    type Item = (&'a [f64], Option<&'a I>);
    type IntoIter = Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
