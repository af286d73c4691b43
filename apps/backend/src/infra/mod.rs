//! Infrastructure layer: store connection and state assembly.

pub mod db;
pub mod state;
