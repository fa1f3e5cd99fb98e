//! Page handlers.
//!
//! Presentation is not this crate's concern; these handlers exist so the
//! gatekeeper and the session guard have real routes to protect. The
//! dashboards mount a [`SessionGuard`] for the authoritative check the
//! edge cannot make (e.g. server-side revocation of an unexpired token).

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::AppState;
use crate::guard::{GuardState, SessionGuard};
use crate::token::Role;

pub async fn home() -> Html<&'static str> {
    Html("<h1>WorkHive</h1>")
}

pub async fn login() -> Html<&'static str> {
    Html("<h1>Log in</h1>")
}

pub async fn features() -> Html<&'static str> {
    Html("<h1>Features</h1>")
}

pub async fn pricing() -> Html<&'static str> {
    Html("<h1>Pricing</h1>")
}

pub async fn how_it_works() -> Html<&'static str> {
    Html("<h1>How it works</h1>")
}

pub async fn employee_dashboard(State(state): State<Arc<AppState>>) -> Response {
    guarded_page(&state, Role::Employee, "<h1>Employee dashboard</h1>").await
}

pub async fn employer_dashboard(State(state): State<Arc<AppState>>) -> Response {
    guarded_page(&state, Role::Employer, "<h1>Employer dashboard</h1>").await
}

/// Run the live session check and only then reveal the page.
async fn guarded_page(state: &AppState, required: Role, content: &'static str) -> Response {
    let mut guard = SessionGuard::new(
        state.session_check.clone(),
        Some(required),
        state.paths.clone(),
    );
    match guard.resolve().await {
        GuardState::Allowed => Html(content).into_response(),
        GuardState::Denied { navigate_to } => Redirect::temporary(navigate_to).into_response(),
        // resolve() always settles, but an unsettled guard must still
        // never reveal protected content.
        GuardState::Checking => Html("<p>Checking session…</p>").into_response(),
    }
}
