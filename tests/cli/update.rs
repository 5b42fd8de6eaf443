//! Tests for `hazyctl update` against a mock release host.

use crate::support::*;
use std::process::Output;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn release_host(tag: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/latest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"tag_name": tag})),
        )
        .mount(&server)
        .await;
    server
}

async fn update(server: &MockServer) -> Output {
    let api = format!("{}/releases/latest", server.uri());
    let download = format!("{}/download", server.uri());
    tokio::task::spawn_blocking(move || {
        let t = Test::new();
        t.cmd()
            .env("HAZYCTL_RELEASE_API", api)
            .env("HAZYCTL_RELEASE_DOWNLOAD", download)
            .arg("update")
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_shows_both_versions_when_current() {
    let version = env!("CARGO_PKG_VERSION");
    let server = release_host(&format!("v{}", version)).await;

    let output = update(&server).await;
    assert_success(&output);
    assert_stdout_contains(&output, &format!("Current version: {}", version));
    assert_stdout_contains(&output, &format!("Latest version: {}", version));
    assert_stdout_contains(&output, "already up to date");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_failed_download_is_fatal() {
    // Newer release whose archive is missing: nothing is replaced.
    let server = release_host("v999.0.0").await;

    let output = update(&server).await;
    assert_fatal(&output, "release check failed");
    assert_stdout_contains(&output, "Latest version: 999.0.0");
}
