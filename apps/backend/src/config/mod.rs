pub mod db;
pub mod env;

pub use db::{db_url, StoreKind};
pub use env::RuntimeEnv;
