//! HTTP adapters for the platform REST API.

pub mod client;
pub mod form_target;
pub mod resources;

pub use client::{Auth, RestClient};
pub use form_target::FormTarget;
