// src/core/indexing/vector/kdtree/shared.rs

//! A KD-Tree behind a single reader/writer lock.

use std::sync::RwLock;

use super::tree::KdTree;
use crate::core::common::lock_utils::{into_inner_poisoned, read_lock_poisoned, write_lock_poisoned};
use crate::core::common::OxirecError;

/// Thread-safe wrapper around [`KdTree`].
///
/// Insertions take the write lock for their whole duration; queries share
/// the read lock since they never change the tree's structure.
#[derive(Debug)]
pub struct SharedKdTree<I> {
    inner: RwLock<KdTree<I>>,
}

impl<I> SharedKdTree<I> {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self::from_tree(KdTree::new(dimension))
    }

    #[must_use]
    pub const fn from_tree(tree: KdTree<I>) -> Self {
        Self { inner: RwLock::new(tree) }
    }

    /// Inserts a point under the write lock. See [`KdTree::insert`].
    ///
    /// # Errors
    ///
    /// `OxirecError::Lock` if the lock is poisoned, `OxirecError::Index` if the tree rejects the point.
    pub fn insert(&self, point: Vec<f64>, id: Option<I>) -> Result<(), OxirecError> {
        let mut tree = self.inner.write().map_err(write_lock_poisoned)?;
        tree.insert(point, id)?;
        Ok(())
    }

    /// Nearest identifier under the read lock. See [`KdTree::nearest`].
    ///
    /// # Errors
    ///
    /// `OxirecError::Lock` if the lock is poisoned, `OxirecError::Index` on a dimension mismatch.
    pub fn nearest(&self, target: &[f64]) -> Result<Option<I>, OxirecError>
    where
        I: Clone,
    {
        let tree = self.inner.read().map_err(read_lock_poisoned)?;
        Ok(tree.nearest(target)?)
    }

    /// Up to `k` `(id, distance)` pairs ordered by distance. See [`KdTree::k_nearest`].
    ///
    /// # Errors
    ///
    /// `OxirecError::Lock` if the lock is poisoned, `OxirecError::Index` on a dimension mismatch.
    pub fn k_nearest(&self, target: &[f64], k: usize) -> Result<Vec<(Option<I>, f64)>, OxirecError>
    where
        I: Clone,
    {
        let tree = self.inner.read().map_err(read_lock_poisoned)?;
        let neighbors = tree.k_nearest(target, k)?;
        Ok(neighbors.into_iter().map(|n| (n.id.cloned(), n.distance)).collect())
    }

    /// Number of stored points.
    ///
    /// # Errors
    ///
    /// `OxirecError::Lock` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, OxirecError> {
        Ok(self.inner.read().map_err(read_lock_poisoned)?.len())
    }

    /// # Errors
    ///
    /// `OxirecError::Lock` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, OxirecError> {
        Ok(self.len()? == 0)
    }

    /// Unwraps the tree.
    ///
    /// # Errors
    ///
    /// `OxirecError::Lock` if a writer panicked while holding the lock.
    pub fn into_inner(self) -> Result<KdTree<I>, OxirecError> {
        self.inner.into_inner().map_err(into_inner_poisoned)
    }
}

impl<I> From<KdTree<I>> for SharedKdTree<I> {
    fn from(tree: KdTree<I>) -> Self {
        Self::from_tree(tree)
    }
}
