//! Second-stage session guard for pages needing a live check.
//!
//! The edge gatekeeper decides from locally decoded claims and cannot
//! see server-side revocation. Pages that care mount a [`SessionGuard`]
//! which asks the identity service before any protected content is
//! produced.
//!
//! State machine: `Checking → Allowed | Denied`. A guard that has not
//! settled must never yield protected content; a failed check is
//! terminal for that mount and fails closed to login.

use std::sync::Arc;

use crate::audit;
use crate::decision::RedirectPaths;
use crate::identity::SessionCheck;
use crate::token::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Check in flight; render a loading indicator, nothing protected.
    Checking,
    /// Session is live and satisfies the requirement.
    Allowed,
    /// Session rejected; navigate and render nothing further.
    Denied { navigate_to: String },
}

pub struct SessionGuard<C: SessionCheck> {
    check: Arc<C>,
    requirement: Option<Role>,
    paths: RedirectPaths,
    state: GuardState,
}

impl<C: SessionCheck> SessionGuard<C> {
    pub fn new(check: Arc<C>, requirement: Option<Role>, paths: RedirectPaths) -> Self {
        Self {
            check,
            requirement,
            paths,
            state: GuardState::Checking,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    pub fn is_checking(&self) -> bool {
        matches!(self.state, GuardState::Checking)
    }

    /// Change the role requirement, e.g. when a mounted guard follows a
    /// navigation into a differently guarded area. Resets the guard so
    /// the next [`resolve`](Self::resolve) re-runs the check.
    pub fn set_requirement(&mut self, requirement: Option<Role>) {
        if self.requirement != requirement {
            self.requirement = requirement;
            self.state = GuardState::Checking;
        }
    }

    /// Run the live session check and settle the state.
    ///
    /// Exactly one check is outstanding per call. Dropping the returned
    /// future before it completes leaves the guard in `Checking`, so a
    /// check that resolves after unmount never touches guard state.
    /// Calling on a settled guard returns the settled state unchanged.
    pub async fn resolve(&mut self) -> &GuardState {
        if !self.is_checking() {
            return &self.state;
        }

        let settled = match self.check.check_auth().await {
            Err(err) => {
                // Fail closed: an unreachable identity service denies.
                audit::session_check_failed(&err);
                self.denied(self.paths.login_url())
            }
            Ok(status) if !status.is_authenticated => self.denied(self.paths.login_url()),
            Ok(status) => {
                let actual = status.user.and_then(|u| u.role);
                match (self.requirement, actual) {
                    (Some(required), Some(actual)) if actual != required => {
                        self.denied(self.paths.dashboard_for(actual).to_string())
                    }
                    (Some(_), None) => self.denied(self.paths.login_url()),
                    _ => GuardState::Allowed,
                }
            }
        };

        self.state = settled;
        &self.state
    }

    fn denied(&self, navigate_to: String) -> GuardState {
        audit::guard_denied(self.requirement, &navigate_to);
        GuardState::Denied { navigate_to }
    }
}
