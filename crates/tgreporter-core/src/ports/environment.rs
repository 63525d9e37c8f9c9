//! Environment provider port
//!
//! Supplies a fresh [`EnvironmentSnapshot`] for each report. Values may
//! change between launches, so implementations must not cache them across
//! calls.

use crate::domain::EnvironmentSnapshot;

/// Port trait for application/device/locale metadata
pub trait IEnvironmentProvider: Send + Sync {
    /// Captures the current environment
    fn snapshot(&self) -> EnvironmentSnapshot;
}
