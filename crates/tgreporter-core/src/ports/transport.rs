//! Transport port
//!
//! Delivers one rendered message. A single attempt per call: no retries,
//! no backoff, no queueing.

use crate::domain::{DeliveryConfig, TransportError};

/// Port trait for message delivery
#[async_trait::async_trait]
pub trait ITransport: Send + Sync {
    /// Sends `text` to the chat described by `config`
    ///
    /// # Errors
    ///
    /// - [`TransportError::InvalidResponse`] when no well-formed HTTP response arrived
    /// - [`TransportError::ServerError`] for any status outside 200..300
    /// - [`TransportError::Network`] when the request could not be sent
    async fn send(&self, text: &str, config: &DeliveryConfig) -> Result<(), TransportError>;
}
