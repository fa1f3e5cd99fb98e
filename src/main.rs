//! Gateway entrypoint.
//!
//! Plain TCP server; `LOG_FORMAT=json` switches tracing to JSON output
//! for structured log shipping.

use std::env;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use workhive_gateway::config::Config;
use workhive_gateway::{AppState, create_app};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let json_logs = env::var("LOG_FORMAT").is_ok_and(|v| v == "json");
    if json_logs {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let config = Config::from_env().expect("Failed to load configuration");
    let http_client = reqwest::Client::new();

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(config, http_client));
    let app = create_app(state);

    tracing::info!("Starting gateway on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
