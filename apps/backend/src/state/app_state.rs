use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::config::env::RuntimeEnv;
use crate::payments::PaymentProvider;
use crate::store::DocumentStore;

/// Shared per-process resources, cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    /// Document Store backing every collection
    pub store: Arc<dyn DocumentStore>,
    /// Token signing configuration
    pub security: SecurityConfig,
    /// Cookie profile selector
    pub env: RuntimeEnv,
    /// Payment intent provider
    pub payments: Arc<dyn PaymentProvider>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        security: SecurityConfig,
        env: RuntimeEnv,
        payments: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            store,
            security,
            env,
            payments,
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("env", &self.env)
            .field("token_ttl_secs", &self.security.token_ttl_secs)
            .finish_non_exhaustive()
    }
}
