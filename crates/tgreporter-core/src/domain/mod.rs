//! Domain types for the reporting pipeline
//!
//! - Event intents (`EventIntent`, `EventKind`)
//! - Environment snapshot and its enums
//! - Install identity and its storage key
//! - Delivery credentials
//! - Locale display-name tables
//! - Domain-specific error types

pub mod delivery;
pub mod environment;
pub mod errors;
pub mod event;
pub mod identity;
pub mod locale;

pub use delivery::DeliveryConfig;
pub use environment::{DeviceIdiom, DistributionChannel, EnvironmentSnapshot, UNKNOWN_APP_NAME};
pub use errors::{StoreError, TransportError, NO_RESPONSE_BODY};
pub use event::{EventIntent, EventKind, DEFAULT_CUSTOM_TITLE};
pub use identity::{InstallIdentity, StorageKey, StoreResult};
