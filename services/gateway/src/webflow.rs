//! Thin client for the vendor CMS API
//!
//! Only the calls the gateway itself forwards are modeled here; the rest
//! of the vendor surface is out of scope. Every call authenticates with
//! the bearer token carried by the caller's session cookie.

use common::error::{UpstreamError, UpstreamResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// User agent reported to the vendor API
const USER_AGENT: &str = "Devflow.party";

/// Response to a publish request
#[derive(Debug, Deserialize, Serialize)]
pub struct PublishQueued {
    /// Whether the vendor queued the publish
    pub queued: bool,
}

/// Client for the vendor CMS API
#[derive(Clone)]
pub struct WebflowClient {
    http: reqwest::Client,
    host: String,
}

impl WebflowClient {
    /// Create a new client against `host`
    pub fn new(http: reqwest::Client, host: impl Into<String>) -> Self {
        Self {
            http,
            host: host.into(),
        }
    }

    /// Queue a publish of `site_id` to the selected domains
    pub async fn publish_site(
        &self,
        token: &str,
        site_id: &str,
        domains: &[String],
    ) -> UpstreamResult<PublishQueued> {
        info!("Publishing site {} to {} domain(s)", site_id, domains.len());

        let response = self
            .http
            .post(format!("{}/sites/{}/publish", self.host, site_id))
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&serde_json::json!({ "domains": domains }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::from_status(status));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedBody(e.to_string()))
    }

    /// Revoke the bearer token with the vendor
    pub async fn revoke_token(
        &self,
        token: &str,
        client_id: &str,
        client_secret: &str,
    ) -> UpstreamResult<Value> {
        info!("Revoking access token");

        let response = self
            .http
            .post(format!("{}/oauth/revoke_authorization", self.host))
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&serde_json::json!({
                "access_token": token,
                "client_id": client_id,
                "client_secret": client_secret,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::from_status(status));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedBody(e.to_string()))
    }

    /// Fetch the profile of the token's authorized user
    pub async fn authenticated_user(&self, token: &str) -> UpstreamResult<Value> {
        let response = self
            .http
            .get(format!("{}/user", self.host))
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::from_status(status));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedBody(e.to_string()))
    }
}
