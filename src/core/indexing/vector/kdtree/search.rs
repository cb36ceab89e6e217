// src/core/indexing/vector/kdtree/search.rs

//! Logic for nearest-neighbor and K-Nearest Neighbor (KNN) search in a KD-Tree.
//!
//! Both searches are depth-first over an explicit stack, so a list-shaped
//! tree from sorted input is searched without deep recursion. The child on
//! the target's side of the splitting plane (the near child) is searched
//! first, and the other child only if the plane is closer than the current
//! best match. Distances are compared squared throughout, including the
//! plane offset.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::error::KdTreeError;
use super::tree::{KdNode, KdTree};
use crate::core::vector::similarity::squared_euclidean_distance;

/// A stored point returned by a query.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, I> {
    /// Coordinates of the stored point.
    pub point: &'a [f64],
    /// Identifier the point was inserted with, if any.
    pub id: Option<&'a I>,
    /// Euclidean distance from the query target.
    pub distance: f64,
}

// Only references inside, so copyable whatever `I` is.
impl<I> Clone for Neighbor<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Neighbor<'_, I> {}

impl<'a, I> Neighbor<'a, I> {
    fn from_node(node: &'a KdNode<I>, distance_sq: f64) -> Self {
        Self { point: node.point.as_slice(), id: node.id.as_ref(), distance: distance_sq.sqrt() }
    }
}

/// Best match so far during a nearest-neighbor search.
struct Candidate<'a, I> {
    node: &'a KdNode<I>,
    distance_sq: f64,
}

/// Pending work in a depth-first traversal.
///
/// `Cross` holds the far child of an already visited node. Its pruning
/// check runs only when the frame is popped, after the near subtree has
/// been searched with the best distance found there.
enum Frame<'a, I> {
    Visit { node: &'a KdNode<I>, depth: usize },
    Cross { node: &'a KdNode<I>, depth: usize, plane_distance_sq: f64 },
}

impl<'a, I> Frame<'a, I> {
    /// Pushes the children of a visited `node`: far first, so the near child is popped next.
    fn push_children(
        stack: &mut Vec<Self>,
        node: &'a KdNode<I>,
        target: &[f64],
        depth: usize,
    ) {
        let axis = depth % target.len();
        let (near, far) = node.split_children(target[axis], axis);
        if let Some(far) = far {
            let plane_offset = target[axis] - node.point[axis];
            stack.push(Self::Cross {
                node: far,
                depth: depth + 1,
                plane_distance_sq: plane_offset * plane_offset,
            });
        }
        if let Some(near) = near {
            stack.push(Self::Visit { node: near, depth: depth + 1 });
        }
    }
}

/// Outcome of a nearest-neighbor traversal.
struct NearestSearch<'a, I> {
    best: Candidate<'a, I>,
    visits: usize,
}

impl<I> KdTree<I> {
    /// Returns the identifier of the stored point closest to `target`.
    ///
    /// Returns `Ok(None)` when the tree is empty, and also when the closest
    /// point was inserted without an identifier; use
    /// [`KdTree::nearest_neighbor`] to tell the two apart.
    ///
    /// When several points are equally close, the first one reached by the
    /// near-first traversal wins.
    ///
    /// # Errors
    ///
    /// `KdTreeError::DimensionMismatch` if `target` does not have the tree's dimensionality.
    pub fn nearest(&self, target: &[f64]) -> Result<Option<I>, KdTreeError>
    where
        I: Clone,
    {
        Ok(self.nearest_neighbor(target)?.and_then(|neighbor| neighbor.id.cloned()))
    }

    /// Returns the stored point closest to `target` with its identifier and distance.
    ///
    /// # Errors
    ///
    /// `KdTreeError::DimensionMismatch` if `target` does not have the tree's dimensionality.
    pub fn nearest_neighbor(&self, target: &[f64]) -> Result<Option<Neighbor<'_, I>>, KdTreeError> {
        Ok(self.nearest_search(target)?.map(|search| {
            tracing::trace!(visits = search.visits, len = self.len, "nearest-neighbor search done");
            Neighbor::from_node(search.best.node, search.best.distance_sq)
        }))
    }

    /// Number of nodes whose distance a nearest-neighbor query computes.
    #[cfg(test)]
    pub(crate) fn nearest_visits(&self, target: &[f64]) -> Result<usize, KdTreeError> {
        Ok(self.nearest_search(target)?.map_or(0, |search| search.visits))
    }

    fn nearest_search(&self, target: &[f64]) -> Result<Option<NearestSearch<'_, I>>, KdTreeError> {
        self.check_query(target)?;
        let Some(root) = self.root.as_deref() else {
            return Ok(None); // Empty tree
        };
        Ok(Some(search_nearest(root, target)))
    }
}

/// Depth-first nearest-neighbor search over an explicit stack.
///
/// `best` is carried from frame to frame; an empty child pushes no frame and
/// leaves it unchanged. A later point replaces `best` only when strictly closer.
fn search_nearest<'a, I>(root: &'a KdNode<I>, target: &[f64]) -> NearestSearch<'a, I> {
    let mut best = Candidate { node: root, distance_sq: f64::INFINITY };
    let mut visits = 0;
    let mut stack = vec![Frame::Visit { node: root, depth: 0 }];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Visit { node, depth } => {
                visits += 1;
                let distance_sq = squared_euclidean_distance(target, &node.point);
                if visits == 1 || distance_sq < best.distance_sq {
                    best = Candidate { node, distance_sq };
                }
                Frame::push_children(&mut stack, node, target, depth);
            }
            Frame::Cross { node, depth, plane_distance_sq } => {
                if plane_distance_sq < best.distance_sq {
                    stack.push(Frame::Visit { node, depth });
                }
            }
        }
    }

    NearestSearch { best, visits }
}

/// Represents an item in the KNN search result priority queue.
///
/// `BinaryHeap` is a max-heap, so the worst kept neighbor sits at `peek()`.
/// Among equal distances the later visit ranks as worse, which keeps the
/// earliest visited points when the heap overflows.
struct HeapEntry<'a, I> {
    distance_sq: f64,
    visit: usize,
    node: &'a KdNode<I>,
}

impl<I> PartialEq for HeapEntry<'_, I> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<I> Eq for HeapEntry<'_, I> {}

impl<I> PartialOrd for HeapEntry<'_, I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I> Ord for HeapEntry<'_, I> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_sq.total_cmp(&other.distance_sq).then(self.visit.cmp(&other.visit))
    }
}

/// Traversal state of a KNN search.
struct KnnSearch<'a, 't, I> {
    target: &'t [f64],
    k: usize,
    visits: usize,
    heap: BinaryHeap<HeapEntry<'a, I>>,
}

impl<I> KdTree<I> {
    /// Performs a K-Nearest Neighbor search.
    ///
    /// Returns up to `k` stored points sorted by ascending distance to
    /// `target`. Equally distant points keep their traversal order, the same
    /// tie rule as [`KdTree::nearest`]. An empty tree or `k == 0` yields an
    /// empty vector.
    ///
    /// # Errors
    ///
    /// `KdTreeError::DimensionMismatch` if `target` does not have the tree's dimensionality.
    pub fn k_nearest(&self, target: &[f64], k: usize) -> Result<Vec<Neighbor<'_, I>>, KdTreeError> {
        Ok(self.knn_search(target, k)?.map_or_else(Vec::new, |search| {
            search
                .heap
                .into_sorted_vec()
                .into_iter()
                .map(|entry| Neighbor::from_node(entry.node, entry.distance_sq))
                .collect()
        }))
    }

    /// Number of nodes whose distance a k-nearest query computes.
    #[cfg(test)]
    pub(crate) fn k_nearest_visits(&self, target: &[f64], k: usize) -> Result<usize, KdTreeError> {
        Ok(self.knn_search(target, k)?.map_or(0, |search| search.visits))
    }

    fn knn_search<'t>(
        &self,
        target: &'t [f64],
        k: usize,
    ) -> Result<Option<KnnSearch<'_, 't, I>>, KdTreeError> {
        self.check_query(target)?;
        let Some(root) = self.root.as_deref() else {
            return Ok(None);
        };
        if k == 0 {
            return Ok(None);
        }

        let mut search = KnnSearch {
            target,
            k,
            visits: 0,
            heap: BinaryHeap::with_capacity(k.saturating_add(1)),
        };
        search.run(root);
        Ok(Some(search))
    }
}

impl<'a, I> KnnSearch<'a, '_, I> {
    fn run(&mut self, root: &'a KdNode<I>) {
        let mut stack = vec![Frame::Visit { node: root, depth: 0 }];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Visit { node, depth } => {
                    self.offer(node);
                    Frame::push_children(&mut stack, node, self.target, depth);
                }
                Frame::Cross { node, depth, plane_distance_sq } => {
                    if self.must_cross(plane_distance_sq) {
                        stack.push(Frame::Visit { node, depth });
                    }
                }
            }
        }
    }

    fn offer(&mut self, node: &'a KdNode<I>) {
        let distance_sq = squared_euclidean_distance(self.target, &node.point);
        self.visits += 1;
        let entry = HeapEntry { distance_sq, visit: self.visits, node };

        if self.heap.len() < self.k {
            self.heap.push(entry);
        } else if self.heap.peek().is_some_and(|worst| distance_sq < worst.distance_sq) {
            self.heap.pop();
            self.heap.push(entry);
        }
    }

    fn must_cross(&self, plane_distance_sq: f64) -> bool {
        self.heap.len() < self.k
            || self.heap.peek().is_some_and(|worst| plane_distance_sq < worst.distance_sq)
    }
}
