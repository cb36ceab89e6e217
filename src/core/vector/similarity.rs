// src/core/vector/similarity.rs

use crate::core::common::OxirecError;

/// Sum of squared coordinate differences between two points of equal length.
///
/// Callers are expected to have checked the lengths already; extra
/// coordinates of the longer slice are ignored. The KD-tree compares these
/// squared values directly, and squares plane offsets before comparing
/// against them, so both sides of every pruning test use the same metric.
#[must_use]
pub fn squared_euclidean_distance(v1: &[f64], v2: &[f64]) -> f64 {
    v1.iter().zip(v2.iter()).map(|(a, b)| (a - b).powi(2)).sum()
}

/// Calculates the Euclidean distance between two vectors.
///
/// # Arguments
///
/// * `v1` - A slice of f64 representing the first vector.
/// * `v2` - A slice of f64 representing the second vector.
///
/// # Returns
///
/// * `Result<f64, OxirecError>` - The Euclidean distance between the two vectors, or an error if
///   the vectors have different dimensions.
///
/// # Errors
///
/// * `OxirecError::InvalidInput` if `v1` and `v2` differ in length.
pub fn euclidean_distance(v1: &[f64], v2: &[f64]) -> Result<f64, OxirecError> {
    if v1.len() != v2.len() {
        return Err(OxirecError::invalid_input(format!(
            "Vector dimension mismatch: dim1 = {}, dim2 = {}",
            v1.len(),
            v2.len()
        )));
    }

    Ok(squared_euclidean_distance(v1, v2).sqrt())
}
