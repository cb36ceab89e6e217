//! Lock error handling utilities following DRY principle
//!
//! Poisoned `RwLock`s are surfaced as `OxirecError::Lock` instead of panicking.

use crate::core::common::OxirecError;
use std::sync::{PoisonError, RwLockReadGuard, RwLockWriteGuard};

/// Convert a poisoned read lock error to OxirecError
pub fn read_lock_poisoned<T>(_: PoisonError<RwLockReadGuard<'_, T>>) -> OxirecError {
    OxirecError::Lock("Failed to acquire read lock".to_string())
}

/// Convert a poisoned write lock error to OxirecError
pub fn write_lock_poisoned<T>(_: PoisonError<RwLockWriteGuard<'_, T>>) -> OxirecError {
    OxirecError::Lock("Failed to acquire write lock".to_string())
}

/// Convert the error returned by `RwLock::into_inner` on a poisoned lock
pub fn into_inner_poisoned<T>(_: PoisonError<T>) -> OxirecError {
    OxirecError::Lock("Lock poisoned".to_string())
}
