//! Administrative console for the GratiSwag rewards marketplace.
//!
//! The library holds the session store, the REST client and the view state
//! machines that keep list and form screens in step with the platform API.
//! The `gratiswag-admin` binary drives them from the command line.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
