use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crpt_client::functions::run;
use crpt_client::settings::ConfigManager;
use serde_json::json;
use tokio::sync::broadcast;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_fixture(
    dir: &Path,
    url: &str,
    max_requests: u32,
    window_millis: u64,
    requests: u32,
) -> Arc<ConfigManager> {
    let document_path = dir.join("document.json");
    fs::write(
        &document_path,
        json!({
            "docId": "doc-1",
            "ownerInn": "7711111111",
            "products": [{ "uitCode": "010460" }]
        })
        .to_string(),
    )
    .expect("document");

    let config_path = dir.join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[log]
level = "info"

[rate_limit]
max_requests = {max_requests}
window_millis = {window_millis}

[api]
url = "{url}"
timeout_secs = 5

[driver]
document_path = {document_path:?}
signature = "SIGNATURE"
requests = {requests}
concurrency = 10
"#,
            document_path = document_path.to_string_lossy(),
        ),
    )
    .expect("config");

    let environment = ConfigManager::environment().source(Some(config::Map::new()));
    Arc::new(ConfigManager::from_path(config_path, environment).expect("config manager"))
}

#[tokio::test]
async fn submits_every_document_and_reports_outcomes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_fixture(dir.path(), &server.uri(), 2, 50, 5);

    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let report = run(config, shutdown_rx).await.expect("report");

    assert_eq!(report.succeeded, 3);
    assert_eq!(report.rejected, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.total(), 5);
    assert_eq!(server.received_requests().await.expect("requests").len(), 5);
}

#[tokio::test]
async fn shutdown_cancels_submissions_waiting_for_permits() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_fixture(dir.path(), &server.uri(), 1, 60_000, 3);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        let _ = shutdown_tx.send(());
    });

    let report = tokio::time::timeout(Duration::from_secs(5), run(config, shutdown_rx))
        .await
        .expect("run finished after shutdown")
        .expect("report");

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.cancelled, 2);
    assert_eq!(server.received_requests().await.expect("requests").len(), 1);
}

#[tokio::test]
async fn missing_document_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_fixture(dir.path(), "http://127.0.0.1:1/create", 1, 1_000, 1);
    fs::remove_file(dir.path().join("document.json")).expect("remove");

    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let err = run(config, shutdown_rx).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read document"));
}
