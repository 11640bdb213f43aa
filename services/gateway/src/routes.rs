//! Gateway service routes
//!
//! Thin handlers that read the session cookie and forward to the vendor
//! API. Authentication gating for pages lives in the session gate
//! middleware; the `/api` routes answer with an error payload instead of
//! redirecting when the cookie is missing.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    cooldown,
    error::{GatewayError, GatewayResult},
    middleware::session_gate,
    session::Session,
    state::AppState,
};

/// Request to publish a site to one or more domains
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub site_id: String,
    pub domains: Vec<String>,
}

/// Create the router for the gateway service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(home))
        .route("/login", get(login_page))
        .route("/webflow_redirect", get(oauth_landing))
        .route("/api/auth", get(auth_info))
        .route("/api/logout", post(logout))
        .route("/api/publish-site", post(publish_site))
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "gateway"
    }))
}

/// Landing stub for authenticated traffic
pub async fn home() -> Html<&'static str> {
    Html("<!doctype html><html><body><h1>Devflow Party</h1></body></html>")
}

/// Login entry point, exempt from the authentication redirect
pub async fn login_page(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<!doctype html><html><body><a href=\"{}\">Install Devflow Party</a></body></html>",
        state.oauth.authorize_url()
    ))
}

/// Landing page for the OAuth redirect
///
/// The session gate has already performed the code exchange and attached
/// the session cookies to this response; the page itself only sends the
/// browser home. It must answer 200 rather than redirect so the cookies
/// are committed before any navigation.
pub async fn oauth_landing() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><meta http-equiv=\"refresh\" content=\"0; url=/\"></head>\
         <body>Signing you in...</body></html>",
    )
}

/// Report authentication state and, when unauthenticated, the install URL
pub async fn auth_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> GatewayResult<Response> {
    let session = Session::from_headers(&headers);

    let body = match session.token() {
        None => json!({
            "msg": "Not authenticated",
            "authUrl": state.oauth.authorize_url(),
        }),
        Some(token) => {
            let user = state.webflow.authenticated_user(token).await?;
            json!({ "user": user })
        }
    };

    let mut response = Json(body).into_response();
    if let Some(origin) = headers.get(header::ORIGIN) {
        response
            .headers_mut()
            .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    }
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );

    Ok(response)
}

/// Revoke the session's token upstream and clear both session cookies
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> GatewayResult<Response> {
    let session = Session::from_headers(&headers);

    let Some(token) = session.token() else {
        // Nothing to revoke; logging out twice is fine
        return Ok(Json(json!({ "ok": true })).into_response());
    };

    if let Err(e) = state
        .webflow
        .revoke_token(token, &state.config.client_id, &state.config.client_secret)
        .await
    {
        // The cookies are cleared regardless so the user is not stuck in a
        // session the vendor may already consider dead
        warn!("Failed to revoke token upstream: {}", e);
    }

    let mut response = Json(json!({ "ok": true })).into_response();
    for cookie in Session::clear() {
        append_set_cookie(&mut response, &cookie.header_value());
    }

    Ok(response)
}

/// Queue a publish for a site, subject to the per-site cooldown window
pub async fn publish_site(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PublishRequest>,
) -> GatewayResult<Response> {
    let session = Session::from_headers(&headers);
    let Some(token) = session.token() else {
        return Err(GatewayError::Unauthorized);
    };

    if payload.domains.is_empty() {
        return Err(GatewayError::BadRequest(
            "At least one domain must be selected".to_string(),
        ));
    }

    // Authoritative check; the client-side cookie record is advisory only
    if let Err(remaining) = state.publish_limiter.check(&payload.site_id).await {
        info!(
            "Publish for site {} rejected with {}s remaining",
            payload.site_id, remaining
        );
        return Err(GatewayError::RateLimited);
    }

    let queued = state
        .webflow
        .publish_site(token, &payload.site_id, &payload.domains)
        .await?;

    let mut response = Json(&queued).into_response();
    if queued.queued {
        // Only a confirmed publish starts the cooldown
        state.publish_limiter.record(&payload.site_id).await;
        let cookie = cooldown::record_cookie(&payload.site_id, Utc::now());
        append_set_cookie(&mut response, &cookie.header_value());
    }

    Ok(response)
}

fn append_set_cookie(response: &mut Response, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => {
            warn!("Failed to encode Set-Cookie header: {}", e);
        }
    }
}
