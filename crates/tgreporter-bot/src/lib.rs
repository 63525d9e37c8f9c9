//! tgreporter Bot - Telegram Bot API transport
//!
//! Implements the `ITransport` port with a single `sendMessage` call per
//! report. See [`client::BotClient`].

pub mod client;

pub use client::{BotClient, TELEGRAM_API_BASE_URL};
