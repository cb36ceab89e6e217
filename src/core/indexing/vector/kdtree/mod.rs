// src/core/indexing/vector/kdtree/mod.rs

//! KD-Tree implementation for product feature vectors.
//!
//! The tree is built incrementally: each inserted point becomes a node, and
//! the node at depth `d` splits space on coordinate `d % dimension`. Points
//! strictly below the split go left, all others go right. Queries return the
//! exact nearest neighbor (or the `k` nearest) under Euclidean distance.

// Re-export key components for easier use.
pub use self::error::KdTreeError;
pub use self::search::Neighbor;
pub use self::shared::SharedKdTree;
pub use self::tree::{Iter, KdTree};

// Modules within the kdtree crate
mod error;
mod insert;
mod search;
mod shared;
mod tree;
