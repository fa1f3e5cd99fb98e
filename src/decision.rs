//! The authorization decision engine.
//!
//! Pure policy: no I/O, no panics. The gatekeeper and the session guard
//! both compute a [`Decision`] first and perform exactly one navigation
//! side effect afterwards, so the branching logic stays testable without
//! an HTTP harness.

use crate::config::Config;
use crate::policy::RouteClass;
use crate::token::{Claims, Role};

/// Outcome of evaluating a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToLogin,
    RedirectToRoleHome(Role),
}

/// Why a request was denied. Every variant maps to a redirect, never to
/// an error surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    #[error("no credential presented")]
    MissingCredential,

    #[error("credential could not be decoded")]
    MalformedCredential,

    #[error("credential has expired")]
    ExpiredCredential,

    #[error("authenticated role does not match the area's required role")]
    RoleMismatch { actual: Option<Role> },

    #[error("live session check failed")]
    SessionCheckFailed,
}

impl AuthzError {
    /// The redirect this denial degrades to. A role mismatch routes the
    /// identity to its own dashboard; an identity with no role has no
    /// dashboard to go to and falls back to login.
    pub fn decision(&self) -> Decision {
        match self {
            AuthzError::RoleMismatch { actual: Some(role) } => Decision::RedirectToRoleHome(*role),
            _ => Decision::RedirectToLogin,
        }
    }
}

/// Evaluate a classified request, in order: public, presence, expiry,
/// role requirement.
pub fn evaluate(
    class: RouteClass,
    credential_present: bool,
    claims: Option<&Claims>,
    now: u64,
    expire_when_exp_missing: bool,
) -> Result<(), AuthzError> {
    let requirement = match class {
        RouteClass::Public => return Ok(()),
        RouteClass::Protected { requirement } => requirement,
    };

    let claims = match claims {
        Some(claims) => claims,
        None if credential_present => return Err(AuthzError::MalformedCredential),
        None => return Err(AuthzError::MissingCredential),
    };

    if claims.is_expired(now, expire_when_exp_missing) {
        return Err(AuthzError::ExpiredCredential);
    }

    if let Some(required) = requirement {
        if claims.role != Some(required) {
            return Err(AuthzError::RoleMismatch {
                actual: claims.role,
            });
        }
    }

    Ok(())
}

/// [`evaluate`] collapsed to the decision the caller acts on.
pub fn decide(
    class: RouteClass,
    credential_present: bool,
    claims: Option<&Claims>,
    now: u64,
    expire_when_exp_missing: bool,
) -> Decision {
    match evaluate(class, credential_present, claims, now, expire_when_exp_missing) {
        Ok(()) => Decision::Allow,
        Err(err) => err.decision(),
    }
}

/// Redirect targets, resolved from configuration rather than hardcoded.
#[derive(Debug, Clone)]
pub struct RedirectPaths {
    pub login: String,
    pub employee_dashboard: String,
    pub employer_dashboard: String,
}

impl RedirectPaths {
    pub fn from_config(config: &Config) -> Self {
        Self {
            login: config.login_path.clone(),
            employee_dashboard: config.employee_dashboard_path.clone(),
            employer_dashboard: config.employer_dashboard_path.clone(),
        }
    }

    /// Login redirect target, carrying the `mode=login` marker the
    /// frontend uses to open the login form.
    pub fn login_url(&self) -> String {
        format!("{}?mode=login", self.login)
    }

    /// Dashboard path for the identity's actual role.
    pub fn dashboard_for(&self, role: Role) -> &str {
        match role {
            Role::Employee => &self.employee_dashboard,
            Role::Employer => &self.employer_dashboard,
        }
    }

    /// Navigation target for a decision, `None` when the request may
    /// proceed.
    pub fn target(&self, decision: Decision) -> Option<String> {
        match decision {
            Decision::Allow => None,
            Decision::RedirectToLogin => Some(self.login_url()),
            Decision::RedirectToRoleHome(role) => Some(self.dashboard_for(role).to_string()),
        }
    }
}
