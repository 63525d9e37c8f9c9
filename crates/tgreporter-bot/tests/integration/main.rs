//! Integration tests for tgreporter-bot
//!
//! Uses wiremock to simulate the Telegram Bot API and raw sockets for
//! malformed and unreachable endpoints.

mod common;

mod test_send_message;
