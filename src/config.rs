//! Application configuration via environment variables.

use std::env;

/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cookie holding the bearer token. The `Authorization` header is
    /// the fallback transport.
    pub auth_cookie_name: String,
    pub login_path: String,
    pub employee_dashboard_path: String,
    pub employer_dashboard_path: String,
    /// Paths reachable without authentication (exact or segment-prefix).
    pub public_routes: Vec<String>,
    /// Path prefixes never evaluated by the gatekeeper.
    pub excluded_prefixes: Vec<String>,
    /// Base URL of the identity service answering live session checks.
    pub identity_service_url: String,
    pub port: u16,
    /// Whether a token with a missing or unparsable `exp` claim counts
    /// as expired. The upstream behavior is `false` (never expires);
    /// this is an explicit policy knob, not an accident.
    pub expire_when_exp_missing: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `IDENTITY_SERVICE_URL`. Everything else defaults to
    /// the paths the frontend uses.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            auth_cookie_name: env::var("AUTH_COOKIE_NAME").unwrap_or_else(|_| "auth_token".into()),
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".into()),
            employee_dashboard_path: env::var("EMPLOYEE_DASHBOARD_PATH")
                .unwrap_or_else(|_| "/employeeDashboard".into()),
            employer_dashboard_path: env::var("EMPLOYER_DASHBOARD_PATH")
                .unwrap_or_else(|_| "/employerDashboard".into()),
            public_routes: env_list("PUBLIC_ROUTES", DEFAULT_PUBLIC_ROUTES),
            excluded_prefixes: env_list("EXCLUDED_PREFIXES", DEFAULT_EXCLUDED_PREFIXES),
            identity_service_url: required_env("IDENTITY_SERVICE_URL")?,
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            expire_when_exp_missing: env::var("EXPIRE_WHEN_EXP_MISSING")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    /// Session-check endpoint on the identity service.
    pub fn session_check_url(&self) -> String {
        format!(
            "{}/session/check",
            self.identity_service_url.trim_end_matches('/')
        )
    }
}

const DEFAULT_PUBLIC_ROUTES: &str = "/,/login,/features,/pricing,/working,/api/auth";
const DEFAULT_EXCLUDED_PREFIXES: &str = "/static,/assets,/favicon.ico,/health";

/// Configuration for testing — all fields settable directly.
impl Config {
    pub fn test_default() -> Self {
        Self {
            auth_cookie_name: "auth_token".into(),
            login_path: "/login".into(),
            employee_dashboard_path: "/employeeDashboard".into(),
            employer_dashboard_path: "/employerDashboard".into(),
            public_routes: split_list(DEFAULT_PUBLIC_ROUTES),
            excluded_prefixes: split_list(DEFAULT_EXCLUDED_PREFIXES),
            identity_service_url: "http://localhost:4000".into(),
            port: 3000,
            expire_when_exp_missing: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(String),
}

fn required_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnv(key.into()))
}

fn env_list(key: &str, default: &str) -> Vec<String> {
    let raw = env::var(key).unwrap_or_else(|_| default.into());
    split_list(&raw)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_creates_valid_config() {
        let cfg = Config::test_default();
        assert_eq!(cfg.auth_cookie_name, "auth_token");
        assert_eq!(cfg.login_path, "/login");
        assert_eq!(cfg.port, 3000);
        assert!(!cfg.expire_when_exp_missing);
        assert!(cfg.public_routes.contains(&"/".to_string()));
        assert!(cfg.excluded_prefixes.contains(&"/static".to_string()));
    }

    #[test]
    fn test_session_check_url_strips_trailing_slash() {
        let mut cfg = Config::test_default();
        cfg.identity_service_url = "http://auth.internal:4000/".into();
        assert_eq!(
            cfg.session_check_url(),
            "http://auth.internal:4000/session/check"
        );
    }

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list("/a, /b ,,/c"),
            vec!["/a".to_string(), "/b".to_string(), "/c".to_string()]
        );
    }

    #[test]
    fn test_from_env_missing_required() {
        // SAFETY: tests run single-threaded per process start; no other
        // thread reads the environment concurrently here.
        unsafe { env::remove_var("IDENTITY_SERVICE_URL") };
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("IDENTITY_SERVICE_URL"));
    }
}
