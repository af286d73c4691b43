//! Error handling for the Meal Lounge backend.

pub mod error_code;

pub use error_code::ErrorCode;
