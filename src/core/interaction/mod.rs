//! Collaborators around the similarity index: ratings, sessions and the product catalog.

pub mod matrix;
pub mod session;
pub mod store;

pub use matrix::InteractionMatrix;
pub use session::{Interaction, SessionMap};
pub use store::{Product, ProductCatalog};
