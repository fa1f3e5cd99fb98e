//! Bearer token decoding.
//!
//! The gateway reads claims from the standard three-segment JWT encoding
//! without verifying the signature — the identity service owns issuance
//! and revocation, and the edge decision only needs to read role and
//! expiry. The authoritative check happens in the session guard.

use base64::{
    Engine,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Identity role carried in the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Employer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Employer => "employer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims decoded from a bearer token.
///
/// Unknown roles and unparsable `exp` values decode to `None` instead of
/// failing the whole payload: a malformed claim is a representable state,
/// not a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    #[serde(default, deserialize_with = "role_or_none")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "secs_or_none")]
    pub exp: Option<u64>,
    #[serde(default)]
    pub sub: Option<String>,
}

impl Claims {
    /// Whether the token is expired at `now` (seconds since epoch).
    ///
    /// A missing or unparsable `exp` is governed by
    /// `expire_when_exp_missing`: the default `false` reproduces the
    /// upstream behavior of treating such tokens as never expiring.
    pub fn is_expired(&self, now: u64, expire_when_exp_missing: bool) -> bool {
        match self.exp {
            Some(exp) => exp < now,
            None => expire_when_exp_missing,
        }
    }
}

/// Deserialize a role claim, mapping unknown or non-string values to `None`.
pub fn role_or_none<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| match s {
            "employee" => Some(Role::Employee),
            "employer" => Some(Role::Employer),
            _ => None,
        }))
}

fn secs_or_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| v.as_u64()))
}

/// Decode a token's payload segment without signature verification.
///
/// Returns `None` on any structural failure; callers treat a malformed
/// credential exactly like an absent one.
pub fn decode_token(token: &str) -> Option<Claims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(parts[1])
        .or_else(|_| {
            // Some issuers emit padded base64url
            let padded = match parts[1].len() % 4 {
                2 => format!("{}==", parts[1]),
                3 => format!("{}=", parts[1]),
                _ => parts[1].to_string(),
            };
            URL_SAFE.decode(padded)
        })
        .ok()?;

    serde_json::from_slice(&payload_bytes).ok()
}

/// Current time as seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
