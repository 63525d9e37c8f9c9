//! tgreporter - Lifecycle event reporting to a Telegram chat
//!
//! Sends a one-time "first launch" report per install, plus "became active"
//! and custom event reports, to a Telegram chat through the Bot API. Every
//! failure is logged and swallowed; reporting never disturbs the host.
//!
//! ```rust,no_run
//! use tgreporter::{AppInfo, TelegramReporter};
//!
//! # async fn example() {
//! let reporter = TelegramReporter::new(AppInfo::new("Notes", "1.4.0").with_build("42"));
//! reporter
//!     .start_first_launch_report("123456:ABC-DEF", "-1001234567890", "QA", false)
//!     .await;
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tgreporter_bot::BotClient;
use tgreporter_core::{config::Config, IdentityStore, InstallIdentityResolver};
use tgreporter_platform::{KeyringSecureStore, SystemEnvironment};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub use tgreporter_core::{
    usecases::DEFAULT_NAMESPACE, DeliveryConfig, DistributionChannel, EventIntent, EventKind,
    ReportDispatcher, ReportOutcome, SkipReason,
};
pub use tgreporter_platform::AppInfo;

/// Entry point for host applications
#[derive(Clone)]
pub struct TelegramReporter {
    dispatcher: Arc<ReportDispatcher>,
}

impl TelegramReporter {
    /// Reporter with the system keyring, the running host's environment and
    /// the public Bot API
    pub fn new(app: AppInfo) -> Self {
        Self::from_config(&Config::default(), app)
    }

    /// Reporter honouring the identity namespace, API base URL and channel
    /// override of `config`
    pub fn from_config(config: &Config, mut app: AppInfo) -> Self {
        if let Some(channel) = config.report.channel {
            app.channel = Some(channel);
        }

        let store = IdentityStore::new(Arc::new(KeyringSecureStore::new()), &config.identity.namespace);
        let dispatcher = ReportDispatcher::new(
            InstallIdentityResolver::new(store),
            Arc::new(SystemEnvironment::new(app)),
            Arc::new(BotClient::with_base_url(&config.delivery.api_base_url)),
        );
        Self::with_dispatcher(dispatcher)
    }

    /// Reporter over custom ports
    pub fn with_dispatcher(dispatcher: ReportDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn dispatcher(&self) -> &ReportDispatcher {
        &self.dispatcher
    }

    /// Sends the first-launch report once per install.
    ///
    /// With `ignore_first_launch` the report is sent on every call and the
    /// install identity is neither read nor created.
    pub async fn start_first_launch_report(
        &self,
        token: &str,
        chat_id: &str,
        additional: &str,
        ignore_first_launch: bool,
    ) {
        debug!(
            chat_id,
            ignore_first_launch,
            additional_len = additional.chars().count(),
            "First launch report requested"
        );
        let config = DeliveryConfig::new(token, chat_id);
        self.dispatcher
            .start_first_launch_report(&config, additional, ignore_first_launch)
            .await;
    }

    /// Sends one report of `kind`.
    ///
    /// `title` and `details` apply to [`EventKind::Custom`] only; a missing
    /// or blank title becomes `"Custom Event"`.
    pub async fn report(
        &self,
        kind: EventKind,
        title: Option<&str>,
        details: Option<BTreeMap<String, String>>,
        token: &str,
        chat_id: &str,
        additional: &str,
    ) {
        let event = EventIntent::from_parts(kind, title.map(str::to_string), details);
        let config = DeliveryConfig::new(token, chat_id);
        self.dispatcher.report(&event, &config, additional).await;
    }

    /// Runs [`start_first_launch_report`](Self::start_first_launch_report) on
    /// the current tokio runtime. The handle may be dropped.
    ///
    /// Outside a runtime nothing is sent and `None` is returned.
    pub fn spawn_first_launch_report(
        &self,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        additional: impl Into<String>,
        ignore_first_launch: bool,
    ) -> Option<JoinHandle<()>> {
        let handle = current_runtime("first_launch")?;
        let reporter = self.clone();
        let (token, chat_id, additional) = (token.into(), chat_id.into(), additional.into());
        Some(handle.spawn(async move {
            reporter
                .start_first_launch_report(&token, &chat_id, &additional, ignore_first_launch)
                .await;
        }))
    }

    /// Runs [`report`](Self::report) on the current tokio runtime. The handle
    /// may be dropped.
    ///
    /// Outside a runtime nothing is sent and `None` is returned.
    pub fn spawn_report(
        &self,
        kind: EventKind,
        title: Option<String>,
        details: Option<BTreeMap<String, String>>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        additional: impl Into<String>,
    ) -> Option<JoinHandle<()>> {
        let handle = current_runtime(&kind.to_string())?;
        let reporter = self.clone();
        let (token, chat_id, additional) = (token.into(), chat_id.into(), additional.into());
        Some(handle.spawn(async move {
            reporter
                .report(kind, title.as_deref(), details, &token, &chat_id, &additional)
                .await;
        }))
    }
}

fn current_runtime(event: &str) -> Option<Handle> {
    match Handle::try_current() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(event, error = %e, "No tokio runtime, report dropped");
            None
        }
    }
}
