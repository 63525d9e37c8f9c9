//! Use cases
//!
//! - [`InstallIdentityResolver`] - First-observation detection backed by the secure store
//! - [`ReportDispatcher`] - Identity gate, composition and delivery of one report

pub mod dispatch;
pub mod resolve_identity;

pub use dispatch::{ReportDispatcher, ReportOutcome, SkipReason};
pub use resolve_identity::{IdentityStore, InstallIdentityResolver, DEFAULT_NAMESPACE};
