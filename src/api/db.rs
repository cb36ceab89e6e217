use crate::core::common::OxirecError;
use crate::core::config::Config;
use crate::core::interaction::{InteractionMatrix, Product, ProductCatalog, SessionMap};
use crate::core::types::{ProductId, UserId};
use std::path::Path;

/// `Oxirec` is the primary structure providing the public API of the toolkit.
///
/// It owns the three collaborating structures, sized from a validated
/// [`Config`]. They do not depend on each other: ratings, sessions and the
/// similarity index are kept side by side.
#[derive(Debug)]
pub struct Oxirec {
    config: Config,
    matrix: InteractionMatrix,
    sessions: SessionMap,
    catalog: ProductCatalog,
}

impl Oxirec {
    /// Creates a new `Oxirec` instance from `config`.
    ///
    /// # Errors
    /// Returns `OxirecError::Configuration` if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, OxirecError> {
        config.validate()?;
        tracing::debug!(
            feature_dimension = config.feature_dimension,
            max_users = config.max_users,
            max_products = config.max_products,
            "creating oxirec instance"
        );
        Ok(Self {
            matrix: InteractionMatrix::new(config.max_users, config.max_products),
            sessions: SessionMap::with_cache(config.session_cache_enabled),
            catalog: ProductCatalog::new(config.feature_dimension),
            config,
        })
    }

    /// Creates an instance from a TOML configuration file (defaults if the file is missing).
    ///
    /// # Errors
    /// Returns `OxirecError` if the file cannot be read, parsed or validated.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, OxirecError> {
        Self::new(Config::load_from_file(path.as_ref())?)
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut InteractionMatrix {
        &mut self.matrix
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionMap {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionMap {
        &mut self.sessions
    }

    #[must_use]
    pub const fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut ProductCatalog {
        &mut self.catalog
    }

    /// Records a rating in the interaction matrix.
    ///
    /// # Errors
    /// Returns `OxirecError::InvalidInput` if an index is out of range or the rating is not finite.
    pub fn rate(&mut self, user: UserId, product: usize, rating: f32) -> Result<(), OxirecError> {
        self.matrix.update_interaction(user, product, rating)
    }

    /// Appends a product interaction to the user's session.
    pub fn record_interaction(&mut self, user: UserId, product: impl Into<ProductId>) {
        self.sessions.add_interaction(user, product);
    }

    /// Registers a product with its metadata in the catalog.
    ///
    /// # Errors
    /// Returns `OxirecError::AlreadyExists` for a known product id and
    /// `OxirecError::Index` if the features have the wrong dimensionality.
    pub fn register_product(&mut self, product: Product) -> Result<(), OxirecError> {
        self.catalog.register_product(product)
    }

    /// Identifier of the product whose features are closest to `target`.
    ///
    /// # Errors
    /// Returns `OxirecError::Index` if `target` has the wrong dimensionality.
    pub fn find_similar(&self, target: &[f64]) -> Result<Option<ProductId>, OxirecError> {
        self.catalog.find_similar(target)
    }
}
