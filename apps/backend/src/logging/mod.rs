pub mod pii;
pub mod security;

pub use pii::Redacted;
