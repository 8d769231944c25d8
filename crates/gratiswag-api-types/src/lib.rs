//! Wire shapes of the GratiSwag platform REST API.
//!
//! The API wraps every payload in an envelope (`success`, `message`, `data`) and
//! adds `meta` or `pagination` to list responses. Record types mirror the JSON
//! field names the platform emits (camelCase, Mongo style `_id`).

pub mod auth;
pub mod catalog;
pub mod envelope;
pub mod orders;
pub mod reports;
pub mod shops;

pub use auth::*;
pub use catalog::*;
pub use envelope::*;
pub use orders::*;
pub use reports::*;
pub use shops::*;

/// Body used by every status-change endpoint (`PUT .../status/{id}`, `PUT /shop/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatusRequest<S> {
    pub status: S,
}
