//! Configuration module for tgreporter.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::fmt::{self, Debug, Formatter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::{DeliveryConfig, DistributionChannel};
use crate::usecases::DEFAULT_NAMESPACE;

/// Default Bot API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for tgreporter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub delivery: DeliverySection,
    pub identity: IdentitySection,
    pub report: ReportSection,
    pub logging: LoggingSection,
}

/// Bot API credentials and endpoint.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverySection {
    /// Bot token (`<bot id>:<secret>`). Never logged.
    pub token: Option<String>,
    /// Destination chat ID.
    pub chat_id: Option<String>,
    /// Base URL of the Bot API, without a trailing slash.
    pub api_base_url: String,
}

/// Install identity storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentitySection {
    /// Prefix of the keyring service name (`<namespace>.accountInstall`).
    pub namespace: String,
}

/// Report content settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Free-form note appended to the app line of every report.
    pub additional_note: String,
    /// Distribution channel override. Detected from the build profile when unset.
    pub channel: Option<DistributionChannel>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/tgreporter/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("tgreporter")
            .join("config.yaml")
    }

    /// Credentials for one report, when both token and chat ID are set.
    pub fn delivery_config(&self) -> Option<DeliveryConfig> {
        let token = non_blank(self.delivery.token.as_deref())?;
        let chat_id = non_blank(self.delivery.chat_id.as_deref())?;
        Some(DeliveryConfig::new(token, chat_id))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for DeliverySection {
    fn default() -> Self {
        Self {
            token: None,
            chat_id: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Default for IdentitySection {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Debug for DeliverySection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let token = self
            .token
            .as_ref()
            .map(|t| format!("<redacted: {} chars>", t.chars().count()));
        f.debug_struct("DeliverySection")
            .field("token", &token)
            .field("chat_id", &self.chat_id)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"delivery.chat_id"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid. Missing credentials
    /// are not an error here; they may be supplied on the command line.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- delivery ---
        if let Some(token) = &self.delivery.token {
            let token = token.trim();
            if token.is_empty() {
                errors.push(ValidationError {
                    field: "delivery.token".into(),
                    message: "must not be blank when set".into(),
                });
            } else if !token.contains(':') {
                errors.push(ValidationError {
                    field: "delivery.token".into(),
                    message: "expected the form '<bot id>:<secret>'".into(),
                });
            }
        }
        if let Some(chat_id) = &self.delivery.chat_id {
            if chat_id.trim().is_empty() {
                errors.push(ValidationError {
                    field: "delivery.chat_id".into(),
                    message: "must not be blank when set".into(),
                });
            }
        }
        let base = self.delivery.api_base_url.as_str();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            errors.push(ValidationError {
                field: "delivery.api_base_url".into(),
                message: format!("must be an http(s) URL, got '{}'", base),
            });
        } else if base.ends_with('/') {
            errors.push(ValidationError {
                field: "delivery.api_base_url".into(),
                message: "must not end with '/'".into(),
            });
        }

        // --- identity ---
        let namespace = self.identity.namespace.as_str();
        if namespace.is_empty() || namespace.chars().any(char::is_whitespace) {
            errors.push(ValidationError {
                field: "identity.namespace".into(),
                message: "must be non-empty and contain no whitespace".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use tgreporter_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .delivery_token("123456:ABC-DEF")
///     .delivery_chat_id("-1001234567890")
///     .report_additional_note("QA")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- delivery ---

    pub fn delivery_token(mut self, token: impl Into<String>) -> Self {
        self.config.delivery.token = Some(token.into());
        self
    }

    pub fn delivery_chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.config.delivery.chat_id = Some(chat_id.into());
        self
    }

    pub fn delivery_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.delivery.api_base_url = url.into();
        self
    }

    // --- identity ---

    pub fn identity_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.identity.namespace = namespace.into();
        self
    }

    // --- report ---

    pub fn report_additional_note(mut self, note: impl Into<String>) -> Self {
        self.config.report.additional_note = note.into();
        self
    }

    pub fn report_channel(mut self, channel: DistributionChannel) -> Self {
        self.config.report.channel = Some(channel);
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
