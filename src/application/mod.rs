//! Application services: session handling, view state machines and form workflows.

pub mod auth;
pub mod error;
pub mod forms;
pub mod list_sync;
pub mod notify;
pub mod routes;
pub mod session;
