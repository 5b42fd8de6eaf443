//! Test fixtures: mock Key Vault servers.

use super::commands::TEST_TOKEN;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Secrets used across multiple tests.
pub const STANDARD_SECRETS: &[(&str, &str)] = &[
    ("db-pass", "p1"),
    ("api-key", "k1"),
    ("jwt-secret", "super-secret-jwt-token"),
];

/// Start a mock vault serving `secrets` in one listing page.
pub async fn mock_vault(secrets: &[(&str, &str)]) -> MockServer {
    let server = MockServer::start().await;
    let uri = server.uri();

    let items: Vec<serde_json::Value> = secrets
        .iter()
        .map(|(name, _)| {
            serde_json::json!({
                "id": format!("{}/secrets/{}", uri, name),
                "attributes": {"enabled": true, "created": 1700000000, "updated": 1700000000},
                "tags": {"owner": "team-a"}
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/secrets"))
        .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"value": items, "nextLink": null})),
        )
        .mount(&server)
        .await;

    for (name, value) in secrets {
        Mock::given(method("GET"))
            .and(path(format!("/secrets/{}", name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": value,
                "id": format!("{}/secrets/{}/0f3a9c", uri, name),
                "contentType": "text/plain",
                "attributes": {"enabled": true, "exp": 1893456000, "created": 1700000000},
                "tags": {"owner": "team-a"}
            })))
            .mount(&server)
            .await;
    }

    server
}

/// Start a mock vault that accepts every secret write.
pub async fn writable_vault() -> MockServer {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("PUT"))
        .and(path_regex(r"^/secrets/[A-Za-z0-9-]+$"))
        .respond_with(move |req: &wiremock::Request| {
            let name = req.url.path().trim_start_matches("/secrets/").to_string();
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": format!("{}/secrets/{}/1b2c3d", uri, name),
                "attributes": {"enabled": true}
            }))
        })
        .mount(&server)
        .await;
    server
}

/// Bodies of every PUT the server received, keyed by secret name.
pub async fn written(server: &MockServer) -> Vec<(String, serde_json::Value)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == "PUT")
        .map(|r| {
            let name = r.url.path().trim_start_matches("/secrets/").to_string();
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            (name, body)
        })
        .collect()
}
