//! Custom error types for the common library
//!
//! This module defines the error taxonomy for calls to upstream HTTP
//! services (the identity provider's token endpoint and the vendor API).

use reqwest::StatusCode;
use thiserror::Error;

/// Custom error type for upstream HTTP calls
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport-level failure (connection refused, DNS, timeout)
    #[error("upstream request error: {0}")]
    Request(#[source] reqwest::Error),

    /// Upstream answered HTTP 429
    #[error("upstream rate limited the request")]
    RateLimited,

    /// Upstream answered with any other non-2xx status
    #[error("upstream returned status {status}")]
    Status { status: StatusCode },

    /// Upstream answered 2xx but the body could not be used
    #[error("malformed upstream response: {0}")]
    MalformedBody(String),
}

impl UpstreamError {
    /// Classify a non-2xx response status
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            UpstreamError::RateLimited
        } else {
            UpstreamError::Status { status }
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Request(err)
    }
}

/// Type alias for Result with UpstreamError
pub type UpstreamResult<T> = Result<T, UpstreamError>;
