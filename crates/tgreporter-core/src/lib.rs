//! tgreporter Core - Domain logic for lifecycle event reporting
//!
//! This crate contains the hexagonal core of the reporter:
//! - **Domain types** - `EventIntent`, `EnvironmentSnapshot`, `InstallIdentity`, `DeliveryConfig`
//! - **Ports** - Traits for adapters: `ISecureStore`, `IEnvironmentProvider`, `ITransport`
//! - **Message composition** - `MessageComposer`, a pure text renderer
//! - **Use cases** - `InstallIdentityResolver` and `ReportDispatcher`
//!
//! # Architecture
//!
//! The domain and composer modules are pure and perform no I/O.
//! Ports define the trait interfaces implemented by the platform and
//! bot adapter crates. Use cases orchestrate them and absorb every
//! failure at the dispatcher boundary, so a telemetry problem never
//! reaches the host application.

pub mod compose;
pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;

pub use compose::MessageComposer;
pub use domain::{
    DeliveryConfig, DeviceIdiom, DistributionChannel, EnvironmentSnapshot, EventIntent,
    EventKind, InstallIdentity, StorageKey, StoreError, TransportError,
};
pub use usecases::{
    IdentityStore, InstallIdentityResolver, ReportDispatcher, ReportOutcome, SkipReason,
};
