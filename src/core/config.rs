// src/core/config.rs

use crate::core::common::OxirecError;
use serde::{Deserialize, Serialize};
use std::fs; // For reading file
use std::path::Path;

/// Configuration for an [`Oxirec`](crate::Oxirec) instance.
///
/// Missing keys in a TOML file fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Number of coordinates in every product feature vector.
    pub feature_dimension: usize,
    /// Rows of the interaction matrix.
    pub max_users: usize,
    /// Columns of the interaction matrix.
    pub max_products: usize,
    pub session_cache_enabled: bool,
}

/// Builder for Config struct implementing the Builder pattern.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    feature_dimension: Option<usize>,
    max_users: Option<usize>,
    max_products: Option<usize>,
    session_cache_enabled: Option<bool>,
}

impl ConfigBuilder {
    /// Creates a new ConfigBuilder with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the feature vector dimension
    #[must_use]
    pub fn feature_dimension(mut self, dimension: usize) -> Self {
        self.feature_dimension = Some(dimension);
        self
    }

    /// Sets the number of users in the interaction matrix
    #[must_use]
    pub fn max_users(mut self, users: usize) -> Self {
        self.max_users = Some(users);
        self
    }

    /// Sets the number of products in the interaction matrix
    #[must_use]
    pub fn max_products(mut self, products: usize) -> Self {
        self.max_products = Some(products);
        self
    }

    /// Enables or disables the session cache
    #[must_use]
    pub fn session_cache_enabled(mut self, enabled: bool) -> Self {
        self.session_cache_enabled = Some(enabled);
        self
    }

    /// Builds the Config instance with validation
    ///
    /// # Errors
    ///
    /// Returns `OxirecError::Configuration` if the resulting configuration is invalid.
    pub fn build(self) -> Result<Config, OxirecError> {
        let defaults = Config::default();
        let config = Config {
            feature_dimension: self.feature_dimension.unwrap_or(defaults.feature_dimension),
            max_users: self.max_users.unwrap_or(defaults.max_users),
            max_products: self.max_products.unwrap_or(defaults.max_products),
            session_cache_enabled: self
                .session_cache_enabled
                .unwrap_or(defaults.session_cache_enabled),
        };

        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { feature_dimension: 8, max_users: 1024, max_products: 1024, session_cache_enabled: true }
    }
}

impl Config {
    /// Creates a new ConfigBuilder for fluent configuration
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `OxirecError::Configuration` if the feature dimension, the user
    /// count or the product count is zero.
    pub fn validate(&self) -> Result<(), OxirecError> {
        if self.feature_dimension == 0 {
            return Err(OxirecError::Configuration(
                "feature_dimension must be greater than 0".to_string(),
            ));
        }

        if self.max_users == 0 {
            return Err(OxirecError::Configuration("max_users must be greater than 0".to_string()));
        }

        if self.max_products == 0 {
            return Err(OxirecError::Configuration(
                "max_products must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `OxirecError::Configuration` if parsing or validation fails,
    /// and `OxirecError::Io` for other read failures.
    pub fn load_from_file(path: &Path) -> Result<Self, OxirecError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents).map_err(|e| {
                    OxirecError::Configuration(format!(
                        "Failed to parse config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;

                // Validate the loaded configuration
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(OxirecError::Io(e)),
        }
    }

    /// Loads configuration from an optional TOML file path.
    ///
    /// If `optional_path` is `None`, it returns the default configuration.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load_from_file`] when a path is given.
    pub fn load_or_default(optional_path: Option<&Path>) -> Result<Self, OxirecError> {
        match optional_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
