//! Common library for the Devflow Party gateway
//!
//! This crate provides shared functionality used across the gateway
//! service: cookie header plumbing and the upstream error taxonomy.

pub mod cookies;
pub mod error;
