// src/core/vector/mod.rs

pub mod similarity;

pub use similarity::{euclidean_distance, squared_euclidean_distance};
