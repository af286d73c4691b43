//! Shared helpers for backend tests: one-time logging setup and assertions
//! over the JSON error contract.

pub mod error_body;
pub mod logging;
