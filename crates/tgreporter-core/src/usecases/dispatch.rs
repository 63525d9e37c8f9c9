//! Report dispatching use case
//!
//! End-to-end orchestration of one report: identity gate, environment
//! snapshot, composition, and delivery. Inner steps return explicit
//! `Result`s; the two public operations absorb every failure and hand back
//! a [`ReportOutcome`] that callers are free to ignore.
//!
//! ## State machine (per report attempt)
//!
//! ```text
//! Pending ──identity says "not first" / identity error──▶ Skipped
//!    │
//!    └──compose + send──▶ Sent | Failed
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    compose::MessageComposer,
    domain::{DeliveryConfig, EventIntent, StoreError, TransportError},
    ports::{IEnvironmentProvider, ITransport},
    usecases::resolve_identity::InstallIdentityResolver,
};

/// Why a report attempt ended without a delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The install identity already existed
    NotFirstObservation,
    /// The install identity could not be resolved
    IdentityUnavailable(StoreError),
}

/// Terminal state of one report attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No delivery was attempted
    Skipped(SkipReason),
    /// The endpoint accepted the message
    Sent,
    /// Delivery was attempted and failed
    Failed(TransportError),
}

impl ReportOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, ReportOutcome::Sent)
    }

    /// True for `Sent` and `Failed`
    pub fn attempted_delivery(&self) -> bool {
        !matches!(self, ReportOutcome::Skipped(_))
    }
}

/// Use case coordinating identity, environment, composition and transport
#[derive(Clone)]
pub struct ReportDispatcher {
    resolver: InstallIdentityResolver,
    environment: Arc<dyn IEnvironmentProvider>,
    transport: Arc<dyn ITransport>,
}

impl ReportDispatcher {
    /// Creates a dispatcher from its three collaborators
    pub fn new(
        resolver: InstallIdentityResolver,
        environment: Arc<dyn IEnvironmentProvider>,
        transport: Arc<dyn ITransport>,
    ) -> Self {
        Self {
            resolver,
            environment,
            transport,
        }
    }

    /// Returns the install identity resolver
    pub fn resolver(&self) -> &InstallIdentityResolver {
        &self.resolver
    }

    /// Renders `event` against a fresh environment snapshot
    pub fn compose(&self, event: &EventIntent, additional_note: &str) -> String {
        let environment = self.environment.snapshot();
        MessageComposer::compose(event, &environment, additional_note)
    }

    /// Composes and sends `event`, returning the transport's result unchanged
    pub async fn deliver(
        &self,
        event: &EventIntent,
        config: &DeliveryConfig,
        additional_note: &str,
    ) -> Result<(), TransportError> {
        debug!(
            event = %event.log_name(),
            chat_id = config.chat_id(),
            token_len = config.token_len(),
            "Preparing report"
        );

        let message = self.compose(event, additional_note);
        debug!(
            event = %event.log_name(),
            length = message.chars().count(),
            "Built report message"
        );

        self.transport.send(&message, config).await
    }

    /// Sends `event`, absorbing any transport failure
    pub async fn report(
        &self,
        event: &EventIntent,
        config: &DeliveryConfig,
        additional_note: &str,
    ) -> ReportOutcome {
        match self.deliver(event, config, additional_note).await {
            Ok(()) => {
                info!(event = %event.log_name(), "Report sent");
                ReportOutcome::Sent
            }
            Err(e) => {
                warn!(event = %event.log_name(), error = %e, "Report delivery failed");
                ReportOutcome::Failed(e)
            }
        }
    }

    /// Sends a first-launch report if this is the first observation of the install.
    ///
    /// With `skip_identity_check` the report is sent unconditionally and the
    /// identity store is not touched. Identity errors are logged and end the
    /// attempt as [`ReportOutcome::Skipped`].
    pub async fn start_first_launch_report(
        &self,
        config: &DeliveryConfig,
        additional_note: &str,
        skip_identity_check: bool,
    ) -> ReportOutcome {
        if skip_identity_check {
            debug!("Identity check skipped, sending first launch report");
            return self
                .report(&EventIntent::FirstLaunch, config, additional_note)
                .await;
        }

        let identity = match self.resolver.resolve() {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Install identity unavailable, first launch report skipped");
                return ReportOutcome::Skipped(SkipReason::IdentityUnavailable(e));
            }
        };

        debug!(
            is_first_observation = identity.is_first_observation,
            "Resolved install identity"
        );

        if !identity.is_first_observation {
            debug!("Not the first launch for this install, skipping report");
            return ReportOutcome::Skipped(SkipReason::NotFirstObservation);
        }

        self.report(&EventIntent::FirstLaunch, config, additional_note)
            .await
    }
}
