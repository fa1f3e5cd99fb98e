//! Client for the external identity service.
//!
//! The gatekeeper never talks to the identity service; only the session
//! guard does, through the [`SessionCheck`] trait. The HTTP client here
//! is the production implementation; tests use [`StaticSessionCheck`].

use serde::Deserialize;

use crate::config::Config;
use crate::token::{Role, role_or_none};

/// User identity as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    #[serde(default, deserialize_with = "role_or_none")]
    pub role: Option<Role>,
}

/// Result of a live session check.
///
/// Reflects server-authoritative session state: a token the edge still
/// accepts may already be revoked here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthStatus {
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionCheckError {
    #[error("session check request failed: {0}")]
    Transport(String),

    #[error("session check returned HTTP {0}")]
    Status(u16),

    #[error("session check response was not understood: {0}")]
    InvalidResponse(String),
}

/// Capability to ask the identity service whether the session is live.
///
/// Implementations must be idempotent-safe: the guard may call this on
/// every mount and again whenever its requirement changes.
pub trait SessionCheck: Send + Sync {
    fn check_auth(
        &self,
    ) -> impl std::future::Future<Output = Result<AuthStatus, SessionCheckError>> + Send;
}

/// HTTP-backed session check against the identity service.
pub struct HttpSessionCheck {
    client: reqwest::Client,
    url: String,
}

impl HttpSessionCheck {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            url: config.session_check_url(),
        }
    }
}

impl SessionCheck for HttpSessionCheck {
    async fn check_auth(&self) -> Result<AuthStatus, SessionCheckError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SessionCheckError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SessionCheckError::Status(resp.status().as_u16()));
        }

        resp.json()
            .await
            .map_err(|e| SessionCheckError::InvalidResponse(e.to_string()))
    }
}

/// Fixed-outcome session check for tests and local development.
#[derive(Debug, Clone)]
pub struct StaticSessionCheck {
    outcome: Result<AuthStatus, SessionCheckError>,
}

impl StaticSessionCheck {
    pub fn authenticated(role: Option<Role>) -> Self {
        Self {
            outcome: Ok(AuthStatus {
                is_authenticated: true,
                user: Some(SessionUser { role }),
            }),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            outcome: Ok(AuthStatus {
                is_authenticated: false,
                user: None,
            }),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err(SessionCheckError::Transport("connection refused".into())),
        }
    }
}

impl SessionCheck for StaticSessionCheck {
    async fn check_auth(&self) -> Result<AuthStatus, SessionCheckError> {
        self.outcome.clone()
    }
}
