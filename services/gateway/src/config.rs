//! Gateway configuration loaded from environment variables

use anyhow::Result;
use std::env;

/// Configuration for the gateway service
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// OAuth application client id
    pub client_id: String,
    /// OAuth application client secret
    pub client_secret: String,
    /// Identity provider token endpoint
    pub token_endpoint: String,
    /// Base URL of the vendor API
    pub api_host: String,
    /// Origin allowed on CORS preflight responses
    pub cors_allow_origin: String,
    /// Address the HTTP server binds to
    pub listen_addr: String,
}

impl GatewayConfig {
    /// Create a new GatewayConfig from environment variables
    ///
    /// # Environment Variables
    /// - `WEBFLOW_CLIENT_ID`: OAuth client id (required)
    /// - `WEBFLOW_CLIENT_SECRET`: OAuth client secret (required)
    /// - `WEBFLOW_TOKEN_ENDPOINT`: token endpoint URL
    ///   (default: "https://api.webflow.com/oauth/access_token")
    /// - `WEBFLOW_API_HOST`: vendor API base URL
    ///   (default: "https://api.webflow.com")
    /// - `CORS_ALLOW_ORIGIN`: origin for preflight responses
    ///   (default: "http://localhost:1337")
    /// - `LISTEN_ADDR`: bind address (default: "0.0.0.0:3000")
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("WEBFLOW_CLIENT_ID")
            .map_err(|_| anyhow::anyhow!("WEBFLOW_CLIENT_ID environment variable not set"))?;
        let client_secret = env::var("WEBFLOW_CLIENT_SECRET")
            .map_err(|_| anyhow::anyhow!("WEBFLOW_CLIENT_SECRET environment variable not set"))?;

        let token_endpoint = env::var("WEBFLOW_TOKEN_ENDPOINT")
            .unwrap_or_else(|_| "https://api.webflow.com/oauth/access_token".to_string());
        let api_host = env::var("WEBFLOW_API_HOST")
            .unwrap_or_else(|_| "https://api.webflow.com".to_string());
        let cors_allow_origin =
            env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "http://localhost:1337".to_string());
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(GatewayConfig {
            client_id,
            client_secret,
            token_endpoint,
            api_host,
            cors_allow_origin,
            listen_addr,
        })
    }
}
