//! # API Route Modules
//!
//! - `status`: banner at `/` and the `/health` probe.
//! - `classify`: `/process` (JSON text) and `/process-file` (multipart upload).
//! - `frontend`: the static front end under `/app` and `/favicon.ico`.

pub mod classify;
pub mod frontend;
pub mod status;
