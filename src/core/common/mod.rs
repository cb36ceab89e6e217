pub mod error;
pub use error::OxirecError;
pub mod lock_utils;
