//! Publish cooldown limiter
//!
//! A site may only be published once per 60-second window. The limiter has
//! two halves: the cookie-backed record visible to the browser, which the
//! UI uses to disable the publish control and run its countdown, and an
//! in-memory server-side limiter that is the authoritative check. The
//! cookie is a UX affordance only; clearing it does not bypass the window.

use axum::http::HeaderMap;
use chrono::{DateTime, SecondsFormat, Utc};
use common::cookies::{self, SetCookie};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::info;

/// Seconds a site must wait between accepted publish triggers
pub const COOLDOWN_WINDOW_SECONDS: u64 = 60;

/// Lifetime of the `lastPublished-{siteId}` cookie: 60 minutes
pub const COOLDOWN_COOKIE_MAX_AGE_SECONDS: u64 = 60 * 60;

/// Name of the cooldown record cookie for `site_id`
pub fn cookie_name(site_id: &str) -> String {
    format!("lastPublished-{}", site_id)
}

/// Seconds of cooldown left given the last accepted publish time
///
/// Returns 0 when no record exists or the window has fully elapsed.
pub fn time_remaining(last_published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u64 {
    let Some(last_published) = last_published else {
        return 0;
    };

    let elapsed = now.signed_duration_since(last_published).num_seconds();
    if elapsed < 0 {
        // Record from the future (client clock skew); treat as a fresh publish
        return COOLDOWN_WINDOW_SECONDS;
    }

    COOLDOWN_WINDOW_SECONDS.saturating_sub(elapsed as u64)
}

/// Whether the cooldown window for the record has elapsed
pub fn can_publish(last_published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    time_remaining(last_published, now) == 0
}

/// Cooldown record cookie for a publish accepted at `now`
pub fn record_cookie(site_id: &str, now: DateTime<Utc>) -> SetCookie {
    SetCookie::new(
        cookie_name(site_id),
        now.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
    .max_age(COOLDOWN_COOKIE_MAX_AGE_SECONDS)
}

/// Read the last-published timestamp for `site_id` from the request headers
pub fn last_published_from_headers(headers: &HeaderMap, site_id: &str) -> Option<DateTime<Utc>> {
    headers
        .get(axum::http::header::COOKIE)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| cookies::get(header, &cookie_name(site_id)))
        .and_then(|value| value.parse::<DateTime<Utc>>().ok())
}

/// Server-side authoritative publish limiter
///
/// Per-site map of the last accepted publish. The cookie record above can
/// be cleared or spoofed by the client, so acceptance is decided here and
/// a violation surfaces as the 429 path the client already handles.
#[derive(Debug, Clone)]
pub struct PublishLimiter {
    window: Duration,
    entries: Arc<Mutex<HashMap<String, Instant>>>,
}

impl Default for PublishLimiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(COOLDOWN_WINDOW_SECONDS))
    }
}

impl PublishLimiter {
    /// Create a limiter with the given window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check whether `site_id` may be published right now
    ///
    /// Returns the whole seconds remaining in the window on rejection.
    pub async fn check(&self, site_id: &str) -> Result<(), u64> {
        self.check_at(site_id, Instant::now()).await
    }

    /// Record an accepted publish for `site_id`
    pub async fn record(&self, site_id: &str) {
        self.record_at(site_id, Instant::now()).await;
    }

    async fn check_at(&self, site_id: &str, now: Instant) -> Result<(), u64> {
        let entries = self.entries.lock().await;

        match entries.get(site_id) {
            Some(&last) if now.duration_since(last) < self.window => {
                let remaining = (self.window - now.duration_since(last)).as_secs();
                info!(
                    "Publish for site {} rejected, {}s of cooldown remaining",
                    site_id, remaining
                );
                Err(remaining)
            }
            _ => Ok(()),
        }
    }

    async fn record_at(&self, site_id: &str, now: Instant) {
        let mut entries = self.entries.lock().await;
        entries.insert(site_id.to_string(), now);
    }
}
