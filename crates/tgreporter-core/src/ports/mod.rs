//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the boundaries between the pure core and the host platform.
//! Implementations live in the adapter crates.
//!
//! ## Ports Overview
//!
//! - [`ISecureStore`] - Secure key-value storage (system keyring)
//! - [`IEnvironmentProvider`] - Application/OS/device/locale metadata
//! - [`ITransport`] - Delivery of a rendered message to the chat endpoint

pub mod environment;
pub mod secure_store;
pub mod transport;

pub use environment::IEnvironmentProvider;
pub use secure_store::ISecureStore;
pub use transport::ITransport;
