//! Session gate middleware
//!
//! Intercepts every request and decides one of three outcomes: pass the
//! request through, perform the OAuth code exchange and attach the session
//! cookies to the response, or redirect unauthenticated traffic to the
//! login page. CORS preflights short-circuit before any other rule, and
//! API routes are never redirected (they do their own per-route checks).

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, Method, Request, StatusCode, Uri, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::collections::HashMap;
use tracing::{error, info};

use crate::{session::Session, state::AppState};

/// Path the identity provider redirects back to with the authorization code
pub const OAUTH_REDIRECT_PATH: &str = "/webflow_redirect";

/// Login entry point, exempt from the authentication redirect
pub const LOGIN_PATH: &str = "/login";

/// Where a failed code exchange sends the user
pub const AUTH_FAILED_PATH: &str = "/login?error=auth_failed";

/// Gate every inbound request on authentication state
pub async fn session_gate(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // Preflight requests reply successfully before any other rule
    if req.method() == Method::OPTIONS {
        return preflight_response(&state.config.cors_allow_origin);
    }

    let path = req.uri().path().to_string();

    if path == OAUTH_REDIRECT_PATH {
        if let Some(code) = query_param(req.uri(), "code") {
            return match state.oauth.exchange_code(&code).await {
                Ok(token) => match session_cookie_values(&token) {
                    Ok(cookies) => {
                        info!("Authorization code exchanged, establishing session");
                        let mut response = next.run(req).await;
                        for value in cookies {
                            response.headers_mut().append(header::SET_COOKIE, value);
                        }
                        response
                    }
                    Err(e) => {
                        error!("Exchanged token is not cookie-safe: {}", e);
                        Redirect::to(AUTH_FAILED_PATH).into_response()
                    }
                },
                Err(e) => {
                    // A failed exchange must not continue unauthenticated
                    // without telling the user why
                    error!("Failed to get access token: {}", e);
                    Redirect::to(AUTH_FAILED_PATH).into_response()
                }
            };
        }
    }

    // API routes perform their own auth checks and must never redirect
    if path.starts_with("/api") {
        return next.run(req).await;
    }

    if path == "/favicon.ico" {
        return next.run(req).await;
    }

    if path != LOGIN_PATH && !Session::from_headers(req.headers()).is_authenticated() {
        return Redirect::to(LOGIN_PATH).into_response();
    }

    next.run(req).await
}

/// Empty 200 response with the fixed CORS preflight headers
fn preflight_response(allow_origin: &str) -> Response {
    let mut response = StatusCode::OK.into_response();
    let headers = response.headers_mut();

    if let Ok(origin) = HeaderValue::from_str(allow_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    response
}

/// Encode both session cookies as header values, as a unit
///
/// The `authenticated` marker must never be issued without the token
/// cookie, so a token that cannot be carried in a header fails the whole
/// set and the caller treats it as an exchange failure.
fn session_cookie_values(token: &str) -> Result<Vec<HeaderValue>, header::InvalidHeaderValue> {
    Session::issue(token)
        .iter()
        .map(|cookie| HeaderValue::from_str(&cookie.header_value()))
        .collect()
}

/// Extract a decoded query parameter, treating an empty value as absent
fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params.get(name).filter(|value| !value.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_query_param_present() {
        assert_eq!(
            query_param(&uri("/webflow_redirect?code=abc&state=x"), "code"),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_query_param_is_percent_decoded() {
        assert_eq!(
            query_param(&uri("/webflow_redirect?code=a%2Fb%3Dc"), "code"),
            Some("a/b=c".to_string())
        );
    }

    #[test]
    fn test_query_param_empty_value_is_absent() {
        assert_eq!(query_param(&uri("/webflow_redirect?code="), "code"), None);
    }

    #[test]
    fn test_query_param_missing() {
        assert_eq!(query_param(&uri("/webflow_redirect"), "code"), None);
        assert_eq!(query_param(&uri("/webflow_redirect?state=x"), "code"), None);
    }

    #[test]
    fn test_session_cookie_values_encodes_both() {
        let values = session_cookie_values("T").unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_unencodable_token_fails_the_whole_cookie_set() {
        assert!(session_cookie_values("T\nT").is_err());
    }
}
