//! Route classification against the configured public-route table.

use crate::config::Config;
use crate::token::Role;

/// Classification of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected { requirement: Option<Role> },
}

/// Static route tables derived from configuration.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    public: Vec<String>,
    role_areas: Vec<(String, Role)>,
    excluded: Vec<String>,
}

/// Exact-segment prefix match: `/login` and `/login/extra` match the
/// `/login` entry, `/loginextra` does not.
fn segment_match(path: &str, prefix: &str) -> bool {
    if path == prefix {
        return true;
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}

impl RoutePolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            public: config.public_routes.clone(),
            role_areas: vec![
                (config.employer_dashboard_path.clone(), Role::Employer),
                (config.employee_dashboard_path.clone(), Role::Employee),
            ],
            excluded: config.excluded_prefixes.clone(),
        }
    }

    /// Classify a path as public or protected, with the protected
    /// branch carrying the role its area demands (if any).
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.public.iter().any(|p| segment_match(path, p)) {
            return RouteClass::Public;
        }
        let requirement = self
            .role_areas
            .iter()
            .find(|(area, _)| segment_match(path, area))
            .map(|(_, role)| *role);
        RouteClass::Protected { requirement }
    }

    /// Whether the path is outside the gatekeeper entirely (static
    /// assets, health, other framework machinery). Excluded paths are
    /// forwarded without decoding anything.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded.iter().any(|p| path.starts_with(p.as_str()))
    }
}
