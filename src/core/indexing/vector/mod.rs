// src/core/indexing/vector/mod.rs

//! Spatial indexes over product feature vectors.

pub mod kdtree;
