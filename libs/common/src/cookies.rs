//! Cookie header plumbing
//!
//! All session and cooldown state in this application lives in the
//! browser's cookie jar, so both the middleware and the handlers need to
//! read `Cookie` request headers and emit `Set-Cookie` response headers.
//! This module keeps that parsing and rendering in one place.

use std::collections::HashMap;

/// Parse a `Cookie` request header into name/value pairs
///
/// Splits on `;`, trims whitespace, and splits each pair on the first `=`
/// only, so values containing `=` survive intact. Malformed segments
/// without an `=` are skipped.
pub fn parse(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for segment in header.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some((name, value)) = segment.split_once('=') {
            cookies.insert(name.trim().to_string(), value.trim().to_string());
        }
    }

    cookies
}

/// Look up a single cookie value in a `Cookie` request header
pub fn get(header: &str, name: &str) -> Option<String> {
    parse(header).remove(name)
}

/// Builder for a `Set-Cookie` response header
#[derive(Debug, Clone)]
pub struct SetCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Lifetime in seconds; `None` makes a session cookie, `Some(0)` expires it
    pub max_age: Option<u64>,
    /// Cookie path (defaults to `/`)
    pub path: String,
    /// Whether the cookie is hidden from client-side scripts
    pub http_only: bool,
}

impl SetCookie {
    /// Create a new cookie with the default `/` path
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age: None,
            path: "/".to_string(),
            http_only: false,
        }
    }

    /// Set the cookie lifetime in seconds
    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Mark the cookie as HttpOnly
    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    /// Create a removal cookie for `name` (empty value, `Max-Age=0`)
    pub fn removal(name: impl Into<String>) -> Self {
        Self::new(name, "").max_age(0)
    }

    /// Render the `Set-Cookie` header value
    pub fn header_value(&self) -> String {
        let mut header = format!("{}={}; Path={}", self.name, self.value, self.path);

        if let Some(max_age) = self.max_age {
            header.push_str(&format!("; Max-Age={}", max_age));
        }

        if self.http_only {
            header.push_str("; HttpOnly");
        }

        header
    }
}
