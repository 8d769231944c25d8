//! Infrastructure adapters: HTTP access to the platform API, persisted sessions, telemetry.

pub mod error;
pub mod http;
pub mod session_file;
pub mod telemetry;
