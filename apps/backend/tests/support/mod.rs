#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod factory;
pub mod payments;

// Re-export only what current tests actually import
pub use app_builder::{create_test_app, TestContext};
