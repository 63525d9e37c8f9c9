//! Install identity resolution
//!
//! Decides whether the current event is the first one ever observed for
//! this install by reading, or creating, a durable opaque ID in the secure
//! store.
//!
//! ## Concurrency
//!
//! The read-then-create sequence is not atomic. Two concurrent resolutions
//! on a fresh install can both observe "absent", both create an ID, and both
//! report a first observation. The store exposes no compare-and-swap and
//! no lock is taken here; this race is accepted.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    domain::{InstallIdentity, StorageKey, StoreResult},
    ports::ISecureStore,
};

/// Default namespace for the install identity storage key
pub const DEFAULT_NAMESPACE: &str = "dev.tgreporter";

// ============================================================================
// IdentityStore
// ============================================================================

/// Secure store adapter bound to the fixed install-identity key
///
/// The key is dedicated to this feature and never reused for other data.
#[derive(Clone)]
pub struct IdentityStore {
    backend: Arc<dyn ISecureStore>,
    key: StorageKey,
}

impl IdentityStore {
    /// Binds `backend` to the install identity key of `namespace`
    pub fn new(backend: Arc<dyn ISecureStore>, namespace: &str) -> Self {
        Self {
            backend,
            key: StorageKey::install_identity(namespace),
        }
    }

    /// Returns the storage key this store reads and writes
    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    /// Raw stored bytes, if any
    pub fn read(&self) -> Option<Vec<u8>> {
        self.backend.read(&self.key)
    }

    /// Creates or replaces the stored value
    pub fn upsert(&self, data: &[u8]) -> StoreResult<()> {
        self.backend.upsert(&self.key, data)
    }

    /// Decoded stored ID without creating one.
    ///
    /// Returns `None` when nothing is stored or the value is not a
    /// non-empty UTF-8 string.
    pub fn peek(&self) -> Option<String> {
        self.read().and_then(decode_identity)
    }
}

/// Decodes stored bytes; invalid UTF-8 and empty strings count as absent
fn decode_identity(data: Vec<u8>) -> Option<String> {
    String::from_utf8(data).ok().filter(|id| !id.is_empty())
}

// ============================================================================
// InstallIdentityResolver
// ============================================================================

type IdFactory = Arc<dyn Fn() -> String + Send + Sync>;

/// Read-or-create orchestration for the install identity
#[derive(Clone)]
pub struct InstallIdentityResolver {
    store: IdentityStore,
    make_id: IdFactory,
}

impl InstallIdentityResolver {
    /// Creates a resolver generating random v4 UUIDs for new identities
    pub fn new(store: IdentityStore) -> Self {
        Self {
            store,
            make_id: Arc::new(|| Uuid::new_v4().to_string()),
        }
    }

    /// Replaces the ID generator (deterministic IDs in tests)
    pub fn with_id_factory<F>(mut self, make_id: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.make_id = Arc::new(make_id);
        self
    }

    /// Returns the underlying identity store
    pub fn store(&self) -> &IdentityStore {
        &self.store
    }

    /// Resolves the install identity
    ///
    /// 1. A stored, non-empty, UTF-8 value is returned as-is with
    ///    `is_first_observation = false`.
    /// 2. Otherwise a new ID is generated and persisted.
    /// 3. The new ID is returned with `is_first_observation = true`.
    ///
    /// # Errors
    ///
    /// Propagates the store's failure when the new ID cannot be persisted.
    /// A first observation is never reported for an ID that was not stored.
    pub fn resolve(&self) -> StoreResult<InstallIdentity> {
        debug!(key = %self.store.key(), "Reading install identity");

        if let Some(existing) = self.store.read().and_then(decode_identity) {
            debug!("Using existing install identity");
            return Ok(InstallIdentity {
                id: existing,
                is_first_observation: false,
            });
        }

        let new_id = (self.make_id)();
        debug!("No valid install identity found, creating a new one");

        self.store.upsert(new_id.as_bytes())?;

        info!("Stored new install identity");
        Ok(InstallIdentity {
            id: new_id,
            is_first_observation: true,
        })
    }
}
