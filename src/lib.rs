#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(clippy::panic)]
#![warn(clippy::arithmetic_side_effects)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::cast_possible_wrap)]
#![warn(clippy::cast_precision_loss)]
#![warn(clippy::cast_sign_loss)]
#![forbid(unsafe_code)]
#![warn(deprecated, unused, clippy::todo, clippy::module_inception, clippy::wildcard_imports, clippy::correctness, clippy::perf, clippy::style, clippy::complexity, clippy::nursery, clippy::pedantic)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

//! # Oxirec: an in-memory product recommendation toolkit
//!
//! `oxirec` keeps three small structures side by side:
//! - a user/product rating matrix ([`InteractionMatrix`])
//! - a per-user interaction history with an invalidate-on-write cache ([`SessionMap`])
//! - a KD-tree over product feature vectors for exact nearest-neighbor lookup
//!   ([`KdTree`], wrapped by [`ProductCatalog`])
//!
//! ```
//! use oxirec::KdTree;
//!
//! let mut tree = KdTree::new(2);
//! tree.insert(vec![1.0, 2.0], Some(201)).unwrap();
//! tree.insert(vec![3.0, 4.0], Some(202)).unwrap();
//! tree.insert(vec![5.0, 6.0], Some(203)).unwrap();
//!
//! assert_eq!(tree.nearest(&[2.0, 3.0]).unwrap(), Some(201));
//! ```

pub mod api;
pub mod core;

// Re-export key types for easier use by library consumers
pub use api::Oxirec;
pub use crate::core::common::OxirecError;
pub use crate::core::config::Config;
pub use crate::core::indexing::vector::kdtree::{KdTree, KdTreeError, Neighbor, SharedKdTree};
pub use crate::core::interaction::{InteractionMatrix, Product, ProductCatalog, SessionMap};
pub use crate::core::types::{ProductId, UserId};

/// Core result type for the library
pub type Result<T> = std::result::Result<T, OxirecError>;
