//! End-to-end migration between mock vaults.

use crate::support::*;
use std::process::Output;

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
async fn test_migrate_copies_every_secret() {
    let source = mock_vault(&[("db-pass", "p1"), ("api-key", "k1")]).await;
    let destination = writable_vault().await;
    let (src, dst) = (source.uri(), destination.uri());

    let (_t, output) = blocking(Test::new(), move |t| t.migrate(&src, &dst)).await;
    assert_success(&output);
    assert_stdout_contains(&output, "✓ migrated db-pass");
    assert_stdout_contains(&output, "✓ migrated api-key");
    assert_stdout_contains(&output, "migrated 2 secrets");

    let writes = written(&destination).await;
    let names: Vec<&str> = writes.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["db-pass", "api-key"]);

    let (_, body) = &writes[0];
    assert_eq!(body["value"], "p1");
    assert_eq!(body["contentType"], "text/plain");
    assert_eq!(body["tags"]["owner"], "team-a");
    assert_eq!(body["attributes"]["enabled"], true);
    assert_eq!(body["attributes"]["exp"], 1893456000);
    assert!(body["attributes"].get("created").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_migrate_write_failure_stops() {
    let source = mock_vault(&[("a", "1"), ("b", "2"), ("c", "3")]).await;
    let destination = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("PUT"))
        .and(wiremock::matchers::path("/secrets/b"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&destination)
        .await;
    wiremock::Mock::given(wiremock::matchers::method("PUT"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "https://kv/secrets/x/1"
        })))
        .mount(&destination)
        .await;
    let (src, dst) = (source.uri(), destination.uri());

    let (_t, output) = blocking(Test::new(), move |t| t.migrate(&src, &dst)).await;
    assert_fatal(&output, "failed to set secret b");
    assert_stdout_contains(&output, "✓ migrated a");
    assert_stdout_excludes(&output, "migrated c");

    let names: Vec<String> = written(&destination).await.into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_migrate_from_config() {
    let source = mock_vault(&[("from-config", "v")]).await;
    let destination = writable_vault().await;
    let t = Test::with_config(&format!(
        "migrate:\n  source: {}\n  destination: {}\n",
        source.uri(),
        destination.uri()
    ));

    let (_t, output) = blocking(t, |t| t.run(&["secret", "azure", "migrate"])).await;
    assert_success(&output);
    assert_eq!(written(&destination).await.len(), 1);
}
