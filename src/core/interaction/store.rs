// src/core/interaction/store.rs

//! Product catalog backed by a KD-tree over feature vectors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::common::OxirecError;
use crate::core::indexing::vector::kdtree::KdTree;
use crate::core::types::ProductId;

/// Product metadata kept alongside its feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub features: Vec<f64>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, features: Vec<f64>) -> Self {
        Self { id: id.into(), name: name.into(), category: None, features }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Feeds product feature vectors into a [`KdTree`] and maps query results
/// back to product metadata.
///
/// Products may be registered bare (features and id only, through
/// [`ProductCatalog::register`]) or with metadata
/// ([`ProductCatalog::register_product`]).
#[derive(Debug)]
pub struct ProductCatalog {
    index: KdTree<ProductId>,
    products: HashMap<ProductId, Product>,
}

impl ProductCatalog {
    /// Creates an empty catalog for feature vectors of length `dimension`.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self { index: KdTree::new(dimension), products: HashMap::new() }
    }

    /// Adds a feature vector for `id` to the similarity index.
    ///
    /// # Errors
    ///
    /// `OxirecError::Index` if the vector does not have the catalog's dimensionality.
    pub fn register(&mut self, features: Vec<f64>, id: impl Into<ProductId>) -> Result<(), OxirecError> {
        let id = id.into();
        tracing::debug!(product = %id, "registering product features");
        self.index.insert(features, Some(id))?;
        Ok(())
    }

    /// Registers a product's features and keeps its metadata for lookups.
    ///
    /// # Errors
    ///
    /// * `OxirecError::AlreadyExists` if metadata for the id is already registered.
    /// * `OxirecError::Index` if the feature vector has the wrong dimensionality.
    ///
    /// Nothing is stored when an error is returned.
    pub fn register_product(&mut self, product: Product) -> Result<(), OxirecError> {
        if self.products.contains_key(&product.id) {
            return Err(OxirecError::AlreadyExists { name: format!("product {}", product.id) });
        }
        self.register(product.features.clone(), product.id.clone())?;
        self.products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Identifier of the registered product most similar to `target`.
    ///
    /// # Errors
    ///
    /// `OxirecError::Index` if `target` does not have the catalog's dimensionality.
    pub fn find_similar(&self, target: &[f64]) -> Result<Option<ProductId>, OxirecError> {
        Ok(self.index.nearest(target)?)
    }

    /// Metadata of the most similar product, if that product was registered with metadata.
    ///
    /// # Errors
    ///
    /// `OxirecError::Index` if `target` does not have the catalog's dimensionality.
    pub fn find_similar_product(&self, target: &[f64]) -> Result<Option<&Product>, OxirecError> {
        Ok(self.find_similar(target)?.and_then(|id| self.products.get(&id)))
    }

    /// Up to `k` most similar products with their distances, closest first.
    ///
    /// Points registered without an identifier are left out.
    ///
    /// # Errors
    ///
    /// `OxirecError::Index` if `target` does not have the catalog's dimensionality.
    pub fn find_similar_k(
        &self,
        target: &[f64],
        k: usize,
    ) -> Result<Vec<(ProductId, f64)>, OxirecError> {
        Ok(self
            .index
            .k_nearest(target, k)?
            .into_iter()
            .filter_map(|n| n.id.map(|id| (id.clone(), n.distance)))
            .collect())
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Number of indexed feature vectors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub const fn index(&self) -> &KdTree<ProductId> {
        &self.index
    }
}
