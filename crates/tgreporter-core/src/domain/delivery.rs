//! Delivery configuration
//!
//! Short-lived credentials for one report. Never persisted, and the bot
//! token never appears in `Debug` output or log fields.

use std::fmt::{self, Debug, Formatter};

/// Bot token and destination chat for a single report
#[derive(Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    token: String,
    chat_id: String,
}

impl DeliveryConfig {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// The bot token. Only the transport should read this.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Length of the token, safe to log
    pub fn token_len(&self) -> usize {
        self.token.chars().count()
    }
}

impl Debug for DeliveryConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryConfig")
            .field("token", &format_args!("<redacted: {} chars>", self.token_len()))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
