//! Domain layer types and invariants.

pub mod error;
pub mod ids;
pub mod mutation;
pub mod pagination;
pub mod session;
