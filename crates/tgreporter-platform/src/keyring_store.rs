//! Secure store backed by the system keyring
//!
//! Each [`StorageKey`] maps to one keyring entry (`service`, `account`), with
//! the value kept as the entry's secret bytes. On Linux this is the Secret
//! Service (GNOME Keyring, KWallet); on macOS the login keychain; on Windows
//! the Credential Manager.

use tgreporter_core::{
    domain::{StorageKey, StoreError, StoreResult},
    ports::ISecureStore,
};
use tracing::{debug, warn};

/// [`ISecureStore`] implementation over the `keyring` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringSecureStore;

impl KeyringSecureStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &StorageKey) -> keyring::Result<keyring::Entry> {
        keyring::Entry::new(&key.service, &key.account)
    }
}

impl ISecureStore for KeyringSecureStore {
    fn read(&self, key: &StorageKey) -> Option<Vec<u8>> {
        let entry = match Self::entry(key) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to create keyring entry");
                return None;
            }
        };

        match entry.get_secret() {
            Ok(data) => {
                debug!(key = %key, len = data.len(), "Read keyring entry");
                Some(data)
            }
            Err(keyring::Error::NoEntry) => {
                debug!(key = %key, "No keyring entry found");
                None
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read from keyring");
                None
            }
        }
    }

    fn upsert(&self, key: &StorageKey, data: &[u8]) -> StoreResult<()> {
        let entry = Self::entry(key)
            .map_err(|e| StoreError::storage(format!("failed to create keyring entry: {}", e)))?;

        // set_secret creates the entry or overwrites the existing secret
        entry
            .set_secret(data)
            .map_err(|e| StoreError::storage(format!("failed to write keyring entry: {}", e)))?;

        debug!(key = %key, len = data.len(), "Stored keyring entry");
        Ok(())
    }
}
