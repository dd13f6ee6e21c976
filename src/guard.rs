//! Request-time route guard.
//!
//! Runs before any protected view: a protected path with no session cookie
//! is bounced to the landing route, carrying the original path so login can
//! return there. The guard trusts cookie presence only — actual token
//! validation happens in the session store after the route renders.

use crate::session::LANDING_ROUTE;

/// Route prefixes that require a session cookie.
pub const PROTECTED_PREFIXES: &[&str] = &["/leagues", "/profile"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Path is public, or the cookie is present.
    Pass,
    /// Protected path without a cookie; go to the landing route with the
    /// requested path as the `redirect` query parameter.
    Redirect { location: String },
}

/// Decide what to do with a request for `path`.
pub fn decide(path: &str, has_cookie: bool) -> RouteDecision {
    let protected = PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix));

    if !protected || has_cookie {
        return RouteDecision::Pass;
    }

    RouteDecision::Redirect {
        location: format!("{}?redirect={}", LANDING_ROUTE, path),
    }
}
