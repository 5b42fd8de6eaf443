//! End-to-end export against a mock vault.

use crate::support::*;
use std::process::Output;

/// Run a blocking CLI call off the async runtime.
async fn blocking<F>(t: Test, f: F) -> (Test, Output)
where
    F: FnOnce(&Test) -> Output + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let output = f(&t);
        (t, output)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_writes_snapshot() {
    let vault = mock_vault(STANDARD_SECRETS).await;
    let uri = vault.uri();

    let (t, output) = blocking(Test::new(), move |t| t.export(&uri, "out.json")).await;
    assert_success(&output);
    assert_stdout_contains(&output, "exported 3 secrets to out.json");

    let raw = std::fs::read_to_string(t.path("out.json")).unwrap();
    assert!(raw.starts_with("[\n  {"));
    assert!(raw.ends_with("]\n"));

    let records: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    let got: Vec<(&str, &str)> = records
        .iter()
        .map(|r| (r["name"].as_str().unwrap(), r["value"].as_str().unwrap()))
        .collect();
    assert_eq!(got, STANDARD_SECRETS.to_vec());
    assert_eq!(records[0]["content_type"], "text/plain");
    assert_eq!(records[0]["tags"]["owner"], "team-a");
    assert_eq!(records[0]["attributes"]["enabled"], true);
    assert_eq!(records[0]["version"], "0f3a9c");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_uses_configured_defaults() {
    let vault = mock_vault(&[("only", "1")]).await;
    let t = Test::with_config(&format!("export:\n  name: {}\n", vault.uri()));

    let (t, output) = blocking(t, |t| t.run(&["secret", "azure", "export"])).await;
    assert_success(&output);
    assert_stdout_contains(&output, "exported 1 secrets to secrets.json");
    assert!(t.path("secrets.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_empty_vault() {
    let vault = mock_vault(&[]).await;
    let uri = vault.uri();

    let (t, output) = blocking(Test::new(), move |t| t.export(&uri, "empty.json")).await;
    assert_success(&output);
    assert_eq!(std::fs::read_to_string(t.path("empty.json")).unwrap(), "[]\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_fetch_failure_writes_nothing() {
    let vault = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {"code": "Forbidden", "message": "caller lacks list permission"}
        })))
        .mount(&vault)
        .await;
    let uri = vault.uri();

    let (t, output) = blocking(Test::new(), move |t| t.export(&uri, "out.json")).await;
    assert_fatal(&output, "failed to get secrets page");
    assert_stdout_contains(&output, "unauthorized");
    assert_stdout_excludes(&output, "caller lacks list permission");
    assert!(!t.path("out.json").exists());
}
