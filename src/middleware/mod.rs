//! Request-interception middleware.

pub mod gatekeeper;
