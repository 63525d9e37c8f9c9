//! Install identity
//!
//! The durable opaque identifier that marks one logical install. It lives
//! only in the secure store, addressed by a fixed [`StorageKey`].

use std::fmt::{self, Display, Formatter};

use super::errors::StoreError;

/// Suffix appended to the namespace to form the storage service name
pub const INSTALL_SERVICE_SUFFIX: &str = "accountInstall";

/// Fixed account name for the install identity entry
pub const INSTALL_ACCOUNT: &str = "account_install_id";

/// Result of resolving the durable install identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallIdentity {
    /// Opaque identifier (UUID form)
    pub id: String,
    /// True only on the resolution call that created `id`
    pub is_first_observation: bool,
}

/// Fixed (service, account) pair addressing one secure storage entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    pub service: String,
    pub account: String,
}

impl StorageKey {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }

    /// Key of the install identity entry for `namespace`
    pub fn install_identity(namespace: &str) -> Self {
        Self::new(
            format!("{}.{}", namespace, INSTALL_SERVICE_SUFFIX),
            INSTALL_ACCOUNT,
        )
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.account)
    }
}

/// Result alias for secure storage writes
pub type StoreResult<T> = Result<T, StoreError>;
