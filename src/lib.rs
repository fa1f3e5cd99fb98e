//! WorkHive gateway — request authorization in front of the app.
//!
//! Two cooperating gates: the edge gatekeeper middleware decides from
//! locally decoded claims before any handler runs, and the session
//! guard re-checks live session state with the identity service before
//! protected pages render.

pub mod audit;
pub mod config;
pub mod decision;
pub mod guard;
pub mod identity;
pub mod middleware;
pub mod policy;
pub mod routes;
pub mod token;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::decision::RedirectPaths;
use crate::identity::HttpSessionCheck;
use crate::policy::RoutePolicy;

/// Shared application state available to middleware and handlers.
///
/// Everything here is immutable after startup; requests share it only
/// for reading.
pub struct AppState {
    pub config: Config,
    pub policy: RoutePolicy,
    pub paths: RedirectPaths,
    pub session_check: Arc<HttpSessionCheck>,
}

impl AppState {
    pub fn new(config: Config, http_client: reqwest::Client) -> Self {
        let policy = RoutePolicy::from_config(&config);
        let paths = RedirectPaths::from_config(&config);
        let session_check = Arc::new(HttpSessionCheck::new(http_client, &config));
        Self {
            config,
            policy,
            paths,
            session_check,
        }
    }
}

/// Build the Axum router with the gatekeeper in front of every route.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::pages::home))
        .route("/login", get(routes::pages::login))
        .route("/features", get(routes::pages::features))
        .route("/pricing", get(routes::pages::pricing))
        .route("/working", get(routes::pages::how_it_works))
        .route("/employeeDashboard", get(routes::pages::employee_dashboard))
        .route("/employerDashboard", get(routes::pages::employer_dashboard))
        .route("/health", get(routes::health::health))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::gatekeeper::gatekeeper,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
