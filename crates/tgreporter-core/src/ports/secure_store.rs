//! Secure storage port (driven/secondary port)
//!
//! The platform's secure key-value service, reduced to the two operations
//! the identity subsystem needs.
//!
//! ## Design Notes
//!
//! - Synchronous: keyring backends are blocking and each call is a single
//!   short read or write.
//! - `read` folds every failure into `None`. Adapters log the reason.
//! - `upsert` must report failure explicitly so the resolver never claims a
//!   first observation for an ID that was not stored.
//! - There is no compare-and-swap; a read followed by an upsert is not atomic.

use crate::domain::{StorageKey, StoreResult};

/// Port trait for the secure key-value backend
pub trait ISecureStore: Send + Sync {
    /// Reads the raw bytes stored under `key`, if any
    fn read(&self, key: &StorageKey) -> Option<Vec<u8>>;

    /// Creates or replaces the value stored under `key`
    fn upsert(&self, key: &StorageKey, data: &[u8]) -> StoreResult<()>;
}
