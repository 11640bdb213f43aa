//! Cookie-backed session state
//!
//! The gateway keeps no server-side session store. The bearer token lives
//! in the browser's cookie jar and is re-read on every request, so the
//! session here is an immutable per-request value object: mutations are
//! expressed as `Set-Cookie` instructions attached to the response rather
//! than in-place state changes.

use axum::http::HeaderMap;
use common::cookies::{self, SetCookie};

/// Cookie holding the bearer token for the vendor API
pub const AUTH_COOKIE: &str = "webflow_auth";

/// Non-sensitive marker cookie mirroring token presence for client scripts
pub const AUTHENTICATED_COOKIE: &str = "authenticated";

/// Session cookie lifetime: 30 days
pub const SESSION_MAX_AGE_SECONDS: u64 = 60 * 60 * 24 * 30;

/// Per-request session snapshot, deserialized from the `Cookie` header
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Build the session from the request headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = headers
            .get(axum::http::header::COOKIE)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| cookies::get(header, AUTH_COOKIE))
            .filter(|token| !token.is_empty());

        Session { token }
    }

    /// Whether a bearer token is present
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Cookies establishing a new session for `token`
    ///
    /// The `authenticated` marker is only ever issued together with the
    /// token cookie, in the same response.
    pub fn issue(token: &str) -> Vec<SetCookie> {
        vec![
            SetCookie::new(AUTH_COOKIE, token).max_age(SESSION_MAX_AGE_SECONDS),
            SetCookie::new(AUTHENTICATED_COOKIE, "true"),
        ]
    }

    /// Removal cookies tearing the session down
    pub fn clear() -> Vec<SetCookie> {
        vec![
            SetCookie::removal(AUTH_COOKIE),
            SetCookie::removal(AUTHENTICATED_COOKIE),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_session_from_cookie_header() {
        let headers = headers_with_cookie("webflow_auth=tok123; authenticated=true");
        let session = Session::from_headers(&headers);
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok123"));
    }

    #[test]
    fn test_session_without_cookie_header() {
        let session = Session::from_headers(&HeaderMap::new());
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let headers = headers_with_cookie("webflow_auth=");
        let session = Session::from_headers(&headers);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_issue_sets_marker_alongside_token() {
        let cookies = Session::issue("T");
        assert_eq!(cookies.len(), 2);
        assert_eq!(
            cookies[0].header_value(),
            "webflow_auth=T; Path=/; Max-Age=2592000"
        );
        assert_eq!(cookies[1].header_value(), "authenticated=true; Path=/");
    }

    #[test]
    fn test_clear_expires_both_cookies() {
        let cookies = Session::clear();
        assert_eq!(cookies.len(), 2);
        for cookie in &cookies {
            assert_eq!(cookie.max_age, Some(0));
        }
    }
}
