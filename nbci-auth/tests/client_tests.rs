use nbci_auth::{AuthClient, AuthConfig, AuthError, Trust};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOOD_KEY: &str = "nbci_0123456789abcdef";

fn client_for(server: &MockServer) -> AuthClient {
    AuthClient::new(AuthConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    })
}

/// Client pointed at a port nothing listens on.
fn unreachable_client() -> AuthClient {
    AuthClient::new(AuthConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 1,
    })
}

// ── validate: format rejection ──────────────────────────────────

#[tokio::test]
async fn validate_malformed_key_is_invalid_without_network() {
    // Unreachable server: if a request were attempted it would degrade,
    // not reject — an invalid verdict proves the format check ran first.
    let client = unreachable_client();
    let info = client.validate("badkey").await;
    assert!(!info.valid);
    assert_eq!(info.trust, Trust::Authoritative);
    assert!(info.license_type.is_none());
}

#[tokio::test]
async fn validate_malformed_key_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let info = client_for(&server).validate("nbci_x").await;
    assert!(!info.valid);
}

// ── validate: online ────────────────────────────────────────────

#[tokio::test]
async fn validate_accepts_key_confirmed_by_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/validate"))
        .and(body_json(json!({ "api_key": GOOD_KEY })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "license_type": "pro",
            "features": ["realtime", "export"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client_for(&server).validate(GOOD_KEY).await;
    assert!(info.valid);
    assert_eq!(info.trust, Trust::Authoritative);
    assert_eq!(info.license_type.as_deref(), Some("pro"));
    assert!(info.features.contains("realtime"));
    assert!(info.features.contains("export"));
}

#[tokio::test]
async fn validate_handles_missing_features_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/validate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "license_type": "trial" })),
        )
        .mount(&server)
        .await;

    let info = client_for(&server).validate(GOOD_KEY).await;
    assert!(info.valid);
    assert!(info.features.is_empty());
}

#[tokio::test]
async fn validate_rejects_on_non_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let info = client_for(&server).validate(GOOD_KEY).await;
    assert!(!info.valid);
    assert_eq!(info.trust, Trust::Authoritative);
}

#[tokio::test]
async fn validate_rejects_unusable_200_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let info = client_for(&server).validate(GOOD_KEY).await;
    assert!(!info.valid);
}

// ── validate: offline degradation ───────────────────────────────

#[tokio::test]
async fn validate_degrades_when_server_unreachable() {
    let info = unreachable_client().validate(GOOD_KEY).await;
    assert!(info.valid);
    assert_eq!(info.trust, Trust::Degraded);
    assert!(info.license_type.is_none());
    assert!(info.features.is_empty());
}

// ── exchange ────────────────────────────────────────────────────

#[tokio::test]
async fn exchange_returns_token_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/installer/github-token"))
        .and(body_json(json!({ "api_key": GOOD_KEY })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "github_token": "ghs_secret" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server).exchange(GOOD_KEY).await.unwrap();
    assert_eq!(token.expose(), "ghs_secret");
}

#[tokio::test]
async fn exchange_redacts_token_in_debug() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/installer/github-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "github_token": "ghs_secret" })),
        )
        .mount(&server)
        .await;

    let token = client_for(&server).exchange(GOOD_KEY).await.unwrap();
    let debug = format!("{:?}", token);
    assert!(!debug.contains("ghs_secret"));
    assert!(debug.contains("redacted"));
}

#[tokio::test]
async fn exchange_fails_on_malformed_key() {
    let result = unreachable_client().exchange("badkey").await;
    assert!(matches!(result, Err(AuthError::MalformedKey)));
}

#[tokio::test]
async fn exchange_fails_on_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/installer/github-token"))
        .respond_with(ResponseTemplate::new(403).set_body_string("no such customer"))
        .mount(&server)
        .await;

    let result = client_for(&server).exchange(GOOD_KEY).await;
    match result {
        Err(AuthError::TokenExchange(msg)) => assert!(msg.contains("no such customer")),
        other => panic!("expected TokenExchange error, got {:?}", other),
    }
}

#[tokio::test]
async fn exchange_fails_when_server_unreachable() {
    // Unlike validation there is no offline fallback.
    let result = unreachable_client().exchange(GOOD_KEY).await;
    assert!(matches!(result, Err(AuthError::Network(_))));
}

#[tokio::test]
async fn exchange_fails_on_empty_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/installer/github-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "github_token": "" })))
        .mount(&server)
        .await;

    let result = client_for(&server).exchange(GOOD_KEY).await;
    assert!(matches!(result, Err(AuthError::InvalidResponse(_))));
}

#[tokio::test]
async fn exchange_fails_on_unusable_200_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/installer/github-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let result = client_for(&server).exchange(GOOD_KEY).await;
    assert!(matches!(result, Err(AuthError::InvalidResponse(_))));
}

// ── Config ──────────────────────────────────────────────────────

#[test]
fn auth_config_default() {
    let cfg = AuthConfig::default();
    assert_eq!(cfg.base_url, "https://api.nbci.io");
    assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn auth_config_serde_roundtrip() {
    let cfg = AuthConfig {
        base_url: "http://localhost:8080".to_string(),
        timeout_secs: 5,
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let parsed: AuthConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.base_url, "http://localhost:8080");
    assert_eq!(parsed.timeout_secs, 5);
}
