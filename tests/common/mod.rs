//! Test utilities: token factory, test app builder, request helpers.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::sync::Arc;
use workhive_gateway::config::Config;
use workhive_gateway::{AppState, create_app};

/// Build an unsigned three-segment token; the gateway never verifies
/// signatures, so a fake one is enough.
pub fn make_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    let sig = URL_SAFE_NO_PAD.encode(b"fake-signature");
    format!("{header}.{payload}.{sig}")
}

/// Claims for a role with an expiry one hour out.
pub fn fresh_claims(role: &str) -> serde_json::Value {
    let exp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 3600;
    serde_json::json!({"sub": "user-1", "role": role, "exp": exp})
}

pub fn expired_claims(role: &str) -> serde_json::Value {
    serde_json::json!({"sub": "user-1", "role": role, "exp": 1000})
}

pub fn build_test_app() -> (Router, Arc<AppState>) {
    // Identity service deliberately unreachable: tests that get past the
    // edge without meaning to will fail closed instead of passing.
    build_test_app_with_identity("http://localhost:1")
}

/// Build the app with the identity service pointed at `url` (a wiremock
/// server in tests that need the session guard to pass).
pub fn build_test_app_with_identity(url: &str) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.identity_service_url = url.into();
    let state = Arc::new(AppState::new(config, reqwest::Client::new()));
    (create_app(state.clone()), state)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Cookie", format!("auth_token={token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}
