//! Application state shared across handlers

use crate::{
    config::GatewayConfig, cooldown::PublishLimiter, oauth::OAuthClient, webflow::WebflowClient,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub oauth: OAuthClient,
    pub webflow: WebflowClient,
    pub publish_limiter: PublishLimiter,
}

impl AppState {
    /// Build the state from configuration, sharing one HTTP client
    pub fn new(config: GatewayConfig) -> Self {
        let http = reqwest::Client::new();
        let oauth = OAuthClient::new(http.clone(), &config);
        let webflow = WebflowClient::new(http, config.api_host.clone());

        Self {
            config,
            oauth,
            webflow,
            publish_limiter: PublishLimiter::default(),
        }
    }
}
