//! Shared helpers for Bot API integration tests

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tgreporter_bot::BotClient;
use tgreporter_core::DeliveryConfig;

pub const TEST_TOKEN: &str = "123456:TEST-token";
pub const TEST_CHAT_ID: &str = "-1001234567890";

pub fn delivery_config() -> DeliveryConfig {
    DeliveryConfig::new(TEST_TOKEN, TEST_CHAT_ID)
}

/// Path the client posts to for [`TEST_TOKEN`]
pub fn send_message_path() -> String {
    format!("/bot{}/sendMessage", TEST_TOKEN)
}

/// Starts a mock server answering `sendMessage` with `response`.
pub async fn setup_bot_mock(response: ResponseTemplate) -> (MockServer, BotClient) {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(send_message_path()))
        .respond_with(response)
        .mount(&server)
        .await;

    let client = BotClient::with_base_url(server.uri());
    (server, client)
}

/// Accepts one connection, writes bytes that are not HTTP, and closes it.
///
/// Returns the base URL of the listener.
pub async fn spawn_garbage_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let _ = socket.write_all(b"this is not http\r\n\r\n").await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

/// Base URL of a local port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
