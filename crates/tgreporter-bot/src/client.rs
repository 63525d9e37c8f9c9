//! Telegram Bot API client
//!
//! Posts rendered reports to `POST {base}/bot{token}/sendMessage`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tgreporter_bot::BotClient;
//! use tgreporter_core::{ports::ITransport, DeliveryConfig};
//!
//! # async fn example() -> Result<(), tgreporter_core::TransportError> {
//! let client = BotClient::new();
//! let config = DeliveryConfig::new("123456:ABC-DEF", "-1001234567890");
//! client.send("hello", &config).await?;
//! # Ok(())
//! # }
//! ```

use std::error::Error as StdError;

use reqwest::Client;
use serde::Serialize;
use tgreporter_core::{
    domain::{DeliveryConfig, TransportError, NO_RESPONSE_BODY},
    ports::ITransport,
};
use tracing::{debug, info, warn};

/// Public Bot API endpoint
pub const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

/// JSON body of a `sendMessage` call
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// HTTP transport for the Telegram Bot API
///
/// One request per [`ITransport::send`] call. No retries, and no timeout
/// beyond the platform defaults.
#[derive(Debug, Clone)]
pub struct BotClient {
    client: Client,
    base_url: String,
}

impl BotClient {
    /// Creates a client for the public Bot API
    pub fn new() -> Self {
        Self::with_base_url(TELEGRAM_API_BASE_URL)
    }

    /// Creates a client with a custom base URL (tests, self-hosted Bot API servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send_message_url(&self, token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, token)
    }
}

impl Default for BotClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ITransport for BotClient {
    async fn send(&self, text: &str, config: &DeliveryConfig) -> Result<(), TransportError> {
        let body = SendMessageRequest {
            chat_id: config.chat_id(),
            text,
            disable_web_page_preview: true,
        };

        debug!(
            base_url = %self.base_url,
            chat_id = config.chat_id(),
            token_len = config.token_len(),
            text_len = text.chars().count(),
            "Sending message"
        );

        let response = self
            .client
            .post(self.send_message_url(config.token()))
            .json(&body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "Message delivered");
            return Ok(());
        }

        let err = match response.bytes().await {
            Ok(bytes) => TransportError::from_status(status.as_u16(), &bytes),
            Err(_) => TransportError::ServerError {
                status_code: status.as_u16(),
                body: NO_RESPONSE_BODY.to_string(),
            },
        };
        warn!(status = status.as_u16(), error = %err, "Bot API rejected message");
        Err(err)
    }
}

/// Maps a failed request to the transport error taxonomy.
///
/// The request URL carries the bot token, so it is stripped before the
/// error is rendered.
fn classify_send_error(err: reqwest::Error) -> TransportError {
    let err = err.without_url();
    let message = error_chain(&err);

    if err.is_connect() || err.is_timeout() {
        warn!(error = %message, "Network error sending message");
        TransportError::Network(message)
    } else {
        warn!(error = %message, "No valid HTTP response");
        TransportError::InvalidResponse(message)
    }
}

/// `outer: cause: root cause`
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
