#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod payments;
pub mod routes;
pub mod state;
pub mod store;
pub mod trace_ctx;
pub mod utils;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::cookie::TOKEN_COOKIE;
pub use auth::gate::{authenticate, require_admin};
pub use auth::jwt::{mint_access_token, verify_access_token, Claims, TokenError};
pub use auth::Identity;
pub use config::{RuntimeEnv, StoreKind};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{AdminIdentity, CurrentIdentity, IdPath, JsonBody};
pub use infra::state::{build_state, StateBuilder};
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use payments::{PaymentError, PaymentIntent, PaymentProvider};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use store::{DocumentStore, MemoryDocumentStore, ObjectId, SeaDocumentStore};

// Prelude for test convenience
pub mod prelude {
    pub use super::auth::jwt::*;
    pub use super::error::*;
    pub use super::extractors::*;
    pub use super::infra::state::*;
    pub use super::middleware::*;
    pub use super::state::*;
    pub use super::store::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
