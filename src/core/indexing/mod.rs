pub mod vector;

// Re-export the KD-tree types for convenience.
pub use vector::kdtree::{KdTree, KdTreeError, Neighbor, SharedKdTree};
