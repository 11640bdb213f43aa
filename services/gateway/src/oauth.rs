//! OAuth code exchange against the vendor's identity provider

use common::error::{UpstreamError, UpstreamResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GatewayConfig;

/// Scopes requested when installing the application
const ALL_SCOPES: &[&str] = &[
    "assets:read",
    "assets:write",
    "authorized_user:read",
    "cms:read",
    "cms:write",
    "custom_code:read",
    "custom_code:write",
    "forms:read",
    "forms:write",
    "pages:read",
    "pages:write",
    "sites:read",
    "sites:write",
];

/// Body posted to the token endpoint
#[derive(Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// Body returned by the token endpoint
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the identity provider's OAuth endpoints
#[derive(Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    token_endpoint: String,
    client_id: String,
    client_secret: String,
}

impl OAuthClient {
    /// Create a new OAuth client from the gateway configuration
    pub fn new(http: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            http,
            token_endpoint: config.token_endpoint.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// Exchange an authorization code for a bearer token
    ///
    /// Posts `{code, grant_type, client_id, client_secret}` as JSON and
    /// expects `{access_token}` back. A 2xx response carrying an empty
    /// token is treated as a failure.
    pub async fn exchange_code(&self, code: &str) -> UpstreamResult<String> {
        info!("Exchanging authorization code for access token");

        let response = self
            .http
            .post(&self.token_endpoint)
            .json(&TokenRequest {
                code,
                grant_type: "authorization_code",
                client_id: &self.client_id,
                client_secret: &self.client_secret,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::from_status(status));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedBody(e.to_string()))?;

        if body.access_token.is_empty() {
            return Err(UpstreamError::MalformedBody(
                "token endpoint returned an empty access token".to_string(),
            ));
        }

        Ok(body.access_token)
    }

    /// Authorization URL the user visits to install the application
    pub fn authorize_url(&self) -> String {
        format!(
            "https://webflow.com/oauth/authorize?response_type=code&client_id={}&scope={}",
            self.client_id,
            ALL_SCOPES.join("%20")
        )
    }
}
