//! CLI subcommands and the options they share

pub mod config;
pub mod environment;
pub mod identity;
pub mod report;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tgreporter::{AppInfo, DeliveryConfig};
use tgreporter_core::config::Config;
use tracing::debug;

/// Options accepted by every subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Use alternate config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Bot token (overrides delivery.token)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Destination chat ID (overrides delivery.chat_id)
    #[arg(long, global = true)]
    pub chat_id: Option<String>,

    /// Note appended to the app line (overrides report.additional_note)
    #[arg(long, global = true)]
    pub note: Option<String>,

    /// Application name shown in reports
    #[arg(long, global = true)]
    pub app_name: Option<String>,

    /// Application version shown in reports
    #[arg(long, global = true)]
    pub app_version: Option<String>,

    /// Application build number shown in reports
    #[arg(long, global = true)]
    pub app_build: Option<String>,
}

impl GlobalArgs {
    /// `--config`, else the platform default location
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Loads the configuration.
    ///
    /// An explicit `--config` must exist. The default file is optional but
    /// must parse when present.
    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_path();
        if self.config.is_none() && !path.exists() {
            debug!(config_path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }
        Config::load(&path).context("Failed to load configuration")
    }

    /// Credentials from the flags, falling back to the configuration
    pub fn delivery(&self, config: &Config) -> Result<DeliveryConfig> {
        let token = non_blank(self.token.as_deref())
            .or_else(|| non_blank(config.delivery.token.as_deref()));
        let chat_id = non_blank(self.chat_id.as_deref())
            .or_else(|| non_blank(config.delivery.chat_id.as_deref()));

        match (token, chat_id) {
            (Some(token), Some(chat_id)) => Ok(DeliveryConfig::new(token, chat_id)),
            (None, _) => bail!("No bot token: pass --token or set delivery.token"),
            (_, None) => bail!("No chat ID: pass --chat-id or set delivery.chat_id"),
        }
    }

    pub fn note(&self, config: &Config) -> String {
        self.note
            .clone()
            .unwrap_or_else(|| config.report.additional_note.clone())
    }

    pub fn app_info(&self) -> AppInfo {
        let mut app = AppInfo::new(
            self.app_name.as_deref().unwrap_or(env!("CARGO_PKG_NAME")),
            self.app_version.as_deref().unwrap_or(env!("CARGO_PKG_VERSION")),
        );
        if let Some(build) = &self.app_build {
            app = app.with_build(build);
        }
        app
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
