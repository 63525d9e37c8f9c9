//! Integration tests for BotClient::send
//!
//! Covers the request shape and each branch of the error taxonomy.

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tgreporter_bot::BotClient;
use tgreporter_core::{ports::ITransport, TransportError};

use crate::common;

#[tokio::test]
async fn test_send_posts_json_to_send_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(common::send_message_path()))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "chat_id": common::TEST_CHAT_ID,
            "text": "✅ First Launch\nline two",
            "disable_web_page_preview": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": { "message_id": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BotClient::with_base_url(server.uri());
    client
        .send("✅ First Launch\nline two", &common::delivery_config())
        .await
        .expect("send failed");
}

#[tokio::test]
async fn test_any_2xx_is_success() {
    let (_server, client) = common::setup_bot_mock(ResponseTemplate::new(204)).await;

    let result = client.send("hello", &common::delivery_config()).await;
    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let (_server, client) =
        common::setup_bot_mock(ResponseTemplate::new(500).set_body_string("boom")).await;

    let err = client
        .send("hello", &common::delivery_config())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TransportError::ServerError {
            status_code: 500,
            body: "boom".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Telegram API error (HTTP 500): boom");
}

#[tokio::test]
async fn test_client_error_is_a_server_error() {
    let body = r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#;
    let (_server, client) =
        common::setup_bot_mock(ResponseTemplate::new(400).set_body_string(body)).await;

    let err = client
        .send("hello", &common::delivery_config())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert!(err.to_string().contains("chat not found"));
}

#[tokio::test]
async fn test_non_utf8_error_body_uses_placeholder() {
    let (_server, client) =
        common::setup_bot_mock(ResponseTemplate::new(502).set_body_bytes(vec![0xFF, 0xFE])).await;

    let err = client
        .send("hello", &common::delivery_config())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TransportError::ServerError {
            status_code: 502,
            body: "No response body".to_string(),
        }
    );
}

#[tokio::test]
async fn test_malformed_response_is_invalid_response() {
    let base_url = common::spawn_garbage_server().await;
    let client = BotClient::with_base_url(base_url);

    let err = client
        .send("hello", &common::delivery_config())
        .await
        .unwrap_err();

    assert!(
        matches!(err, TransportError::InvalidResponse(_)),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let client = BotClient::with_base_url(common::closed_port_url().await);

    let err = client
        .send("hello", &common::delivery_config())
        .await
        .unwrap_err();

    assert!(
        matches!(err, TransportError::Network(_)),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_errors_never_contain_the_token() {
    let client = BotClient::with_base_url(common::closed_port_url().await);

    let err = client
        .send("hello", &common::delivery_config())
        .await
        .unwrap_err();

    assert!(!err.to_string().contains(common::TEST_TOKEN));
}
