//! Edge gatekeeper: authorization decision before any handler runs.
//!
//! Stateless and synchronous per request — it reads only the incoming
//! request and configuration, never the identity service, so it is safe
//! under unlimited concurrency and adds no latency beyond decoding.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::AppState;
use crate::audit;
use crate::decision::{Decision, evaluate};
use crate::token::{decode_token, unix_now};

/// Axum middleware interposing the authorization decision.
///
/// `Allow` forwards the request unchanged; everything else becomes a
/// 307 so the method survives the hop and nothing caches an
/// auth-dependent redirect.
pub async fn gatekeeper(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    // Static assets and framework machinery are never evaluated.
    if state.policy.is_excluded(&path) {
        return next.run(req).await;
    }

    let credential = extract_credential(req.headers(), &state.config.auth_cookie_name);
    let claims = credential.as_deref().and_then(decode_token);
    let class = state.policy.classify(&path);

    match evaluate(
        class,
        credential.is_some(),
        claims.as_ref(),
        unix_now(),
        state.config.expire_when_exp_missing,
    ) {
        Ok(()) => next.run(req).await,
        Err(err) => match err.decision() {
            Decision::RedirectToLogin => {
                let target = state.paths.login_url();
                audit::edge_denied(&path, &err, &target);
                Redirect::temporary(&target).into_response()
            }
            Decision::RedirectToRoleHome(role) => {
                let target = state.paths.dashboard_for(role).to_string();
                audit::edge_denied(&path, &err, &target);
                Redirect::temporary(&target).into_response()
            }
            // A denial always carries a redirect; forward if it ever
            // does not.
            Decision::Allow => next.run(req).await,
        },
    }
}

/// Extract the bearer credential: auth cookie first, then the
/// `Authorization: Bearer` header.
fn extract_credential(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if let Some(value) = parse_cookie(cookie_header, cookie_name) {
        return Some(value.to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string())
}

fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').map(str::trim).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name { Some(value) } else { None }
    })
}
