//! tgreporter Platform - Host adapters for the reporter's ports
//!
//! - [`KeyringSecureStore`] - `ISecureStore` over the system keyring
//! - [`SystemEnvironment`] - `IEnvironmentProvider` reading OS, locale and device
//! - [`device_catalog`] - Hardware identifier to marketing name mapping

pub mod device_catalog;
pub mod environment;
pub mod keyring_store;

pub use device_catalog::{hardware_model_identifier, resolve_model_name};
pub use environment::{AppInfo, SystemEnvironment};
pub use keyring_store::KeyringSecureStore;
