// src/core/indexing/vector/kdtree/error.rs

use std::fmt;

/// Custom error types for KD-Tree operations.
///
/// An empty tree is not an error: queries against it return `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KdTreeError {
    /// A point or query target has a different number of coordinates than the tree.
    DimensionMismatch { expected: usize, found: usize },
    /// A point with no coordinates cannot be placed on any splitting axis.
    ZeroDimension,
}

impl fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "KD-Tree Dimension Mismatch: expected {} coordinates, found {}",
                expected, found
            ),
            Self::ZeroDimension => {
                write!(f, "KD-Tree Zero Dimension: points need at least one coordinate")
            }
        }
    }
}

impl std::error::Error for KdTreeError {}
