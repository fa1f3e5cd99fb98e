//! Structured audit events for authorization decisions.
//!
//! Denials are emitted as JSON via `tracing` under the `audit` target so
//! they can be filtered and shipped independently of application logs.
//! Never panics.

use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::decision::AuthzError;
use crate::identity::SessionCheckError;
use crate::token::Role;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn emit(event: &serde_json::Value) {
    if let Ok(json) = serde_json::to_string(event) {
        tracing::info!(target: "audit", "{}", json);
    }
}

/// An edge gatekeeper denial: the request was redirected before any
/// handler ran.
pub fn edge_denied(path: &str, err: &AuthzError, redirect_to: &str) {
    emit(&json!({
        "component": "edge_gatekeeper",
        "outcome": "denied",
        "path": path,
        "reason": err.to_string(),
        "redirect_to": redirect_to,
        "time": now_millis(),
    }));
}

/// A session guard denial after the live identity check.
pub fn guard_denied(requirement: Option<Role>, redirect_to: &str) {
    emit(&json!({
        "component": "session_guard",
        "outcome": "denied",
        "required_role": requirement.map(|r| r.as_str()),
        "redirect_to": redirect_to,
        "time": now_millis(),
    }));
}

/// The identity service could not answer a session check. The guard
/// fails closed; this records why.
pub fn session_check_failed(err: &SessionCheckError) {
    emit(&json!({
        "component": "session_guard",
        "outcome": "check_failed",
        "reason": err.to_string(),
        "time": now_millis(),
    }));
}
