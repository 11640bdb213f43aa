//! Devflow Party gateway service
//!
//! Fronts the vendor CMS API for the demo application: a session gate
//! middleware owns the OAuth code exchange and cookie-backed session
//! state, and thin `/api` routes forward publish, logout, and auth-info
//! requests upstream, with a per-site publish cooldown.

pub mod config;
pub mod cooldown;
pub mod error;
pub mod middleware;
pub mod oauth;
pub mod routes;
pub mod session;
pub mod state;
pub mod webflow;
