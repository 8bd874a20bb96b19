//! # HTTP Middleware
//!
//! - `cors`: browser access for the configured front-end origins.
//! - `origin_log`: logs the `Origin` of preflights and API calls.

pub mod cors;
pub mod origin_log;
