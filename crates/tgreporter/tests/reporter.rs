//! End-to-end tests for TelegramReporter
//!
//! Wires the real dispatcher and Bot API client against a wiremock server,
//! with an in-memory secure store and a fixed environment.

use std::collections::{BTreeMap, HashMap};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use tgreporter::{EventKind, ReportDispatcher, TelegramReporter};
use tgreporter_bot::BotClient;
use tgreporter_core::{
    domain::{DeviceIdiom, DistributionChannel, EnvironmentSnapshot, StorageKey, StoreError, StoreResult},
    ports::{IEnvironmentProvider, ISecureStore},
    IdentityStore, InstallIdentityResolver,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TOKEN: &str = "123456:TEST-token";
const CHAT_ID: &str = "42";

#[derive(Default)]
struct MemoryStore {
    entries: Mutex<HashMap<StorageKey, Vec<u8>>>,
    fail_upsert: bool,
}

impl ISecureStore for MemoryStore {
    fn read(&self, key: &StorageKey) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn upsert(&self, key: &StorageKey, data: &[u8]) -> StoreResult<()> {
        if self.fail_upsert {
            return Err(StoreError::storage("locked"));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.clone(), data.to_vec());
        Ok(())
    }
}

struct FixedEnvironment;

impl IEnvironmentProvider for FixedEnvironment {
    fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            app_display_name: Some("Notes".to_string()),
            app_version: Some("1.4.0".to_string()),
            app_build: Some("42".to_string()),
            channel: Some(DistributionChannel::Test),
            idiom: DeviceIdiom::Phone,
            device_model: Some("iPhone 16 Pro".to_string()),
            os_name: Some("iOS".to_string()),
            os_version: Some("18.1".to_string()),
            language_code: Some("en".to_string()),
            region_code: Some("US".to_string()),
            ..Default::default()
        }
    }
}

async fn mount_send_message(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
        .mount(server)
        .await;
}

fn reporter(server: &MockServer, store: Arc<MemoryStore>) -> TelegramReporter {
    let resolver = InstallIdentityResolver::new(IdentityStore::new(store, "com.example.notes"));
    TelegramReporter::with_dispatcher(ReportDispatcher::new(
        resolver,
        Arc::new(FixedEnvironment),
        Arc::new(BotClient::with_base_url(server.uri())),
    ))
}

async fn sent_texts(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            assert_eq!(body["chat_id"], CHAT_ID);
            assert_eq!(body["disable_web_page_preview"], true);
            body["text"].as_str().unwrap().to_string()
        })
        .collect()
}

#[tokio::test]
async fn test_first_launch_is_reported_once() {
    let server = MockServer::start().await;
    mount_send_message(&server, 200).await;
    let store = Arc::new(MemoryStore::default());
    let reporter = reporter(&server, store.clone());

    reporter.start_first_launch_report(TOKEN, CHAT_ID, "QA", false).await;
    reporter.start_first_launch_report(TOKEN, CHAT_ID, "QA", false).await;

    let texts = sent_texts(&server).await;
    assert_eq!(texts.len(), 1);
    assert_eq!(
        texts[0],
        [
            "✅ First Launch",
            "📱 App: Notes • QA",
            "📦 Version: 1.4.0 (42)",
            "🚚 Source: Test",
            "📲 Device: iPhone • iPhone 16 Pro",
            "🧠 OS: iOS 18.1",
            "🌍 Locale: English",
            "🗺️ Region: United States (US)",
            "",
            "#notes",
        ]
        .join("\n")
    );

    let stored = store
        .read(&StorageKey::install_identity("com.example.notes"))
        .expect("identity persisted");
    assert!(!stored.is_empty());
}

#[tokio::test]
async fn test_ignore_first_launch_always_sends() {
    let server = MockServer::start().await;
    mount_send_message(&server, 200).await;
    let reporter = reporter(&server, Arc::new(MemoryStore::default()));

    reporter.start_first_launch_report(TOKEN, CHAT_ID, "", true).await;
    reporter.start_first_launch_report(TOKEN, CHAT_ID, "", true).await;

    assert_eq!(sent_texts(&server).await.len(), 2);
}

#[tokio::test]
async fn test_identity_failure_sends_nothing() {
    let server = MockServer::start().await;
    mount_send_message(&server, 200).await;
    let store = Arc::new(MemoryStore {
        fail_upsert: true,
        ..Default::default()
    });
    let reporter = reporter(&server, store);

    reporter.start_first_launch_report(TOKEN, CHAT_ID, "", false).await;

    assert!(sent_texts(&server).await.is_empty());
}

#[tokio::test]
async fn test_custom_report_with_details() {
    let server = MockServer::start().await;
    mount_send_message(&server, 200).await;
    let reporter = reporter(&server, Arc::new(MemoryStore::default()));

    let details = BTreeMap::from([
        ("step".to_string(), "upload".to_string()),
        ("error".to_string(), "timeout\nafter 30s".to_string()),
    ]);
    reporter
        .report(
            EventKind::Custom,
            Some("Sync Failed"),
            Some(details),
            TOKEN,
            CHAT_ID,
            "",
        )
        .await;

    let texts = sent_texts(&server).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("🧩 Sync Failed\n"));
    assert!(texts[0].contains("📋 Details:\n• error: timeout after 30s\n• step: upload\n"));
}

#[tokio::test]
async fn test_custom_report_without_title_uses_default() {
    let server = MockServer::start().await;
    mount_send_message(&server, 200).await;
    let reporter = reporter(&server, Arc::new(MemoryStore::default()));

    reporter
        .report(EventKind::Custom, Some("  "), None, TOKEN, CHAT_ID, "")
        .await;

    let texts = sent_texts(&server).await;
    assert!(texts[0].starts_with("🧩 Custom Event\n"));
}

#[tokio::test]
async fn test_server_error_is_swallowed() {
    let server = MockServer::start().await;
    mount_send_message(&server, 500).await;
    let reporter = reporter(&server, Arc::new(MemoryStore::default()));

    reporter
        .report(EventKind::BecameActive, None, None, TOKEN, CHAT_ID, "")
        .await;

    let texts = sent_texts(&server).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("▶️ App Became Active\n"));
}

#[tokio::test]
async fn test_spawned_reports_complete() {
    let server = MockServer::start().await;
    mount_send_message(&server, 200).await;
    let reporter = reporter(&server, Arc::new(MemoryStore::default()));

    let first = reporter.spawn_first_launch_report(TOKEN, CHAT_ID, "", false);
    let active = reporter.spawn_report(EventKind::BecameActive, None, None, TOKEN, CHAT_ID, "");
    first.expect("inside a runtime").await.unwrap();
    active.expect("inside a runtime").await.unwrap();

    assert_eq!(sent_texts(&server).await.len(), 2);
}

#[test]
fn test_spawn_without_runtime_drops_report() {
    let resolver = InstallIdentityResolver::new(IdentityStore::new(
        Arc::new(MemoryStore::default()),
        "com.example.notes",
    ));
    let reporter = TelegramReporter::with_dispatcher(ReportDispatcher::new(
        resolver,
        Arc::new(FixedEnvironment),
        Arc::new(BotClient::with_base_url("http://127.0.0.1:9")),
    ));

    let first = std::panic::catch_unwind(AssertUnwindSafe(|| {
        reporter.spawn_first_launch_report(TOKEN, CHAT_ID, "", false)
    }));
    assert!(matches!(first, Ok(None)));

    let custom = std::panic::catch_unwind(AssertUnwindSafe(|| {
        reporter.spawn_report(
            EventKind::Custom,
            Some("Sync Failed".to_string()),
            None,
            TOKEN,
            CHAT_ID,
            "",
        )
    }));
    assert!(matches!(custom, Ok(None)));
}
