#![deny(clippy::all, clippy::pedantic)]

pub mod auth;
pub mod blogs;
pub mod categories;
pub mod dashboard;
pub mod forms;
pub mod lists;
pub mod orders;
pub mod product_requests;
pub mod products;
pub mod profile;
pub mod shops;
pub mod wallet;
