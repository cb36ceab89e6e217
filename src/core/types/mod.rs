//! Identifier types shared by the catalog, the session map and the rating matrix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row index of a user in the interaction matrix and key of the session map.
pub type UserId = usize;

/// Opaque product identifier: either numeric or textual.
///
/// Serialized untagged, so `201` and `"sku-42"` both round-trip naturally
/// through TOML/JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(u64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}
