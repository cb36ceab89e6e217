use std::fmt;

use crate::core::indexing::vector::kdtree::KdTreeError;

#[derive(Debug)]
pub enum OxirecError {
    Io(std::io::Error),
    Configuration(String),
    InvalidInput { message: String },
    AlreadyExists { name: String },
    Lock(String),
    Index(KdTreeError),
}

impl fmt::Display for OxirecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO Error: {}", e),
            Self::Configuration(s) => write!(f, "Configuration error: {}", s),
            Self::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            Self::AlreadyExists { name } => write!(f, "Resource already exists: {}", name),
            Self::Lock(s) => write!(f, "Lock Error: {}", s),
            Self::Index(e) => write!(f, "Index Error: {}", e),
        }
    }
}

impl std::error::Error for OxirecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Index(e) => Some(e),
            _ => None,
        }
    }
}

// Manual From implementations
impl From<std::io::Error> for OxirecError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<KdTreeError> for OxirecError {
    fn from(err: KdTreeError) -> Self {
        Self::Index(err)
    }
}

impl OxirecError {
    /// Shorthand for an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }
}
