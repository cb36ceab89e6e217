// src/core/interaction/session.rs

//! Per-user interaction history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{ProductId, UserId};

/// A single product interaction recorded for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub product_id: ProductId,
    pub recorded_at: DateTime<Utc>,
}

/// Chronological interaction history per user.
///
/// `get_user_session` answers from a per-user cache of product ids when it
/// can. Every write to a user's history evicts that user's cache entry, so
/// cached sessions are never stale.
#[derive(Debug, Clone)]
pub struct SessionMap {
    sessions: HashMap<UserId, Vec<Interaction>>,
    cache: HashMap<UserId, Vec<ProductId>>,
    cache_enabled: bool,
}

impl SessionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(true)
    }

    /// Creates a session map, optionally without the session cache.
    #[must_use]
    pub fn with_cache(cache_enabled: bool) -> Self {
        Self { sessions: HashMap::new(), cache: HashMap::new(), cache_enabled }
    }

    /// Appends an interaction with `product` to `user`'s history.
    pub fn add_interaction(&mut self, user: UserId, product: impl Into<ProductId>) {
        self.record(user, product.into(), Utc::now());
    }

    /// Appends an interaction with an explicit timestamp.
    ///
    /// History order is the order of calls, not of timestamps.
    pub fn record(&mut self, user: UserId, product_id: ProductId, recorded_at: DateTime<Utc>) {
        self.sessions
            .entry(user)
            .or_default()
            .push(Interaction { product_id, recorded_at });
        if self.cache.remove(&user).is_some() {
            tracing::trace!(user, "invalidated cached session");
        }
    }

    /// Products `user` interacted with, oldest first.
    ///
    /// Unknown users have an empty session and are not cached.
    pub fn get_user_session(&mut self, user: UserId) -> Vec<ProductId> {
        if let Some(cached) = self.cache.get(&user) {
            return cached.clone();
        }

        let Some(history) = self.sessions.get(&user) else {
            return Vec::new();
        };
        let products: Vec<ProductId> = history.iter().map(|i| i.product_id.clone()).collect();
        if self.cache_enabled {
            self.cache.insert(user, products.clone());
        }
        products
    }

    /// Full timestamped history of `user`, oldest first.
    #[must_use]
    pub fn history(&self, user: UserId) -> &[Interaction] {
        self.sessions.get(&user).map(Vec::as_slice).unwrap_or_default()
    }

    /// Most recent product `user` interacted with.
    #[must_use]
    pub fn last_interaction(&self, user: UserId) -> Option<&ProductId> {
        self.sessions.get(&user)?.last().map(|i| &i.product_id)
    }

    /// Whether `user`'s session is currently served from the cache.
    #[must_use]
    pub fn is_cached(&self, user: UserId) -> bool {
        self.cache.contains_key(&user)
    }

    /// Number of users with at least one interaction.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sessions_keep_insertion_order() {
        let mut sessions = SessionMap::new();
        sessions.add_interaction(0, 101u64);
        sessions.add_interaction(0, 102u64);
        sessions.add_interaction(1, 103u64);

        assert_eq!(sessions.get_user_session(0), vec![ProductId::Int(101), ProductId::Int(102)]);
        assert_eq!(sessions.get_user_session(1), vec![ProductId::Int(103)]);
        assert_eq!(sessions.user_count(), 2);
    }

    #[test]
    fn test_unknown_user_has_empty_session() {
        let mut sessions = SessionMap::new();
        assert!(sessions.get_user_session(42).is_empty());
        assert!(sessions.history(42).is_empty());
        assert_eq!(sessions.last_interaction(42), None);
    }

    #[test]
    fn test_lookups_of_unknown_users_are_not_cached() {
        let mut sessions = SessionMap::new();
        for user in 0..100 {
            assert!(sessions.get_user_session(user).is_empty());
            assert!(!sessions.is_cached(user));
        }
        assert_eq!(sessions.user_count(), 0);

        sessions.add_interaction(7, 70u64);
        assert_eq!(sessions.get_user_session(7), vec![ProductId::Int(70)]);
        assert!(sessions.is_cached(7));
    }

    #[test]
    fn test_cache_populated_on_read_and_invalidated_on_write() {
        let mut sessions = SessionMap::new();
        sessions.add_interaction(0, 101u64);
        sessions.add_interaction(1, "sku-9");
        assert!(!sessions.is_cached(0));

        assert_eq!(sessions.get_user_session(0), vec![ProductId::Int(101)]);
        assert_eq!(sessions.get_user_session(1), vec![ProductId::from("sku-9")]);
        assert!(sessions.is_cached(0));
        assert!(sessions.is_cached(1));

        // Writing for user 0 must not serve the stale cached session.
        sessions.add_interaction(0, 102u64);
        assert!(!sessions.is_cached(0));
        assert!(sessions.is_cached(1));
        assert_eq!(sessions.get_user_session(0), vec![ProductId::Int(101), ProductId::Int(102)]);
        assert!(sessions.is_cached(0));
    }

    #[test]
    fn test_cache_disabled() {
        let mut sessions = SessionMap::with_cache(false);
        sessions.add_interaction(3, 7u64);
        assert_eq!(sessions.get_user_session(3), vec![ProductId::Int(7)]);
        assert!(!sessions.is_cached(3));
    }

    #[test]
    fn test_history_and_last_interaction() {
        let mut sessions = SessionMap::default();
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap();
        sessions.record(5, ProductId::Int(1), first);
        sessions.record(5, ProductId::from("b"), second);

        let history = sessions.history(5);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], Interaction { product_id: ProductId::Int(1), recorded_at: first });
        assert_eq!(history[1].recorded_at, second);
        assert_eq!(sessions.last_interaction(5), Some(&ProductId::from("b")));
    }
}
