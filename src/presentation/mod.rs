//! Plain-text rendering of console output through askama templates.

pub mod detail;
pub mod format;
pub mod table;
pub mod views;
