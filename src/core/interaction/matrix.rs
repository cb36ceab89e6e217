// src/core/interaction/matrix.rs

//! Sparse user/product rating matrix.

use std::collections::BTreeMap;

use crate::core::common::OxirecError;
use crate::core::types::UserId;

/// User/product interaction matrix with `num_users` rows and `num_products` columns.
///
/// Only non-zero ratings are stored; every other cell reads as `0.0`.
/// Products are addressed by column index here, not by `ProductId`.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    num_users: usize,
    num_products: usize,
    ratings: BTreeMap<(UserId, usize), f32>,
}

impl InteractionMatrix {
    #[must_use]
    pub const fn new(num_users: usize, num_products: usize) -> Self {
        Self { num_users, num_products, ratings: BTreeMap::new() }
    }

    #[must_use]
    pub const fn num_users(&self) -> usize {
        self.num_users
    }

    #[must_use]
    pub const fn num_products(&self) -> usize {
        self.num_products
    }

    /// Records `rating` for `(user, product)`, replacing any previous value.
    ///
    /// A rating of `0.0` clears the cell.
    ///
    /// # Errors
    ///
    /// `OxirecError::InvalidInput` if either index is out of range or the rating is not finite.
    pub fn update_interaction(
        &mut self,
        user: UserId,
        product: usize,
        rating: f32,
    ) -> Result<(), OxirecError> {
        self.check_user(user)?;
        self.check_product(product)?;
        if !rating.is_finite() {
            return Err(OxirecError::invalid_input(format!(
                "rating for user {} and product {} must be finite, got {}",
                user, product, rating
            )));
        }

        if rating == 0.0 {
            self.ratings.remove(&(user, product));
        } else {
            self.ratings.insert((user, product), rating);
        }
        tracing::debug!(user, product, rating, "updated interaction");
        Ok(())
    }

    /// Rating of a single cell.
    ///
    /// # Errors
    ///
    /// `OxirecError::InvalidInput` if either index is out of range.
    pub fn rating(&self, user: UserId, product: usize) -> Result<f32, OxirecError> {
        self.check_user(user)?;
        self.check_product(product)?;
        Ok(self.ratings.get(&(user, product)).copied().unwrap_or(0.0))
    }

    /// All ratings given by `user`, as a dense row of length `num_products`.
    ///
    /// # Errors
    ///
    /// `OxirecError::InvalidInput` if `user` is out of range.
    pub fn get_user_ratings(&self, user: UserId) -> Result<Vec<f32>, OxirecError> {
        self.check_user(user)?;
        let mut row = vec![0.0; self.num_products];
        for (&(_, product), &rating) in self.ratings.range((user, 0)..=(user, usize::MAX)) {
            row[product] = rating;
        }
        Ok(row)
    }

    /// All ratings received by `product`, as a dense column of length `num_users`.
    ///
    /// # Errors
    ///
    /// `OxirecError::InvalidInput` if `product` is out of range.
    pub fn get_product_ratings(&self, product: usize) -> Result<Vec<f32>, OxirecError> {
        self.check_product(product)?;
        let mut column = vec![0.0; self.num_users];
        self.ratings
            .iter()
            .filter(|((_, p), _)| *p == product)
            .for_each(|(&(user, _), &rating)| column[user] = rating);
        Ok(column)
    }

    /// Number of stored (non-zero) ratings.
    #[must_use]
    pub fn non_zero_count(&self) -> usize {
        self.ratings.len()
    }

    fn check_user(&self, user: UserId) -> Result<(), OxirecError> {
        if user >= self.num_users {
            return Err(OxirecError::invalid_input(format!(
                "user {} out of range (matrix has {} users)",
                user, self.num_users
            )));
        }
        Ok(())
    }

    fn check_product(&self, product: usize) -> Result<(), OxirecError> {
        if product >= self.num_products {
            return Err(OxirecError::invalid_input(format!(
                "product {} out of range (matrix has {} products)",
                product, self.num_products
            )));
        }
        Ok(())
    }
}
