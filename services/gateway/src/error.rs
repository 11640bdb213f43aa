//! Custom error types for the gateway service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::UpstreamError;
use serde_json::json;
use thiserror::Error;

/// Message shown when a publish hits the cooldown window, locally or upstream
pub const PUBLISH_COOLDOWN_MESSAGE: &str =
    "You've been recently published your site. Please wait 1 minute before publishing again.";

/// Custom error type for the gateway service
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No session cookie on a route that requires one
    #[error("Not authenticated")]
    Unauthorized,

    /// Publish rejected by the cooldown window
    #[error("{PUBLISH_COOLDOWN_MESSAGE}")]
    RateLimited,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upstream call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Internal server error
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            GatewayError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            GatewayError::RateLimited | GatewayError::Upstream(UpstreamError::RateLimited) => (
                StatusCode::TOO_MANY_REQUESTS,
                PUBLISH_COOLDOWN_MESSAGE.to_string(),
            ),
            GatewayError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            GatewayError::Upstream(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            GatewayError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for gateway results
pub type GatewayResult<T> = Result<T, GatewayError>;
