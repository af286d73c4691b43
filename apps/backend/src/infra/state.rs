use std::sync::Arc;

use crate::config::db::StoreKind;
use crate::config::env::RuntimeEnv;
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::payments::{PaymentProvider, StripeClient};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::store::{DocumentStore, MemoryDocumentStore, SeaDocumentStore};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    env: RuntimeEnv,
    store_kind: StoreKind,
    store: Option<Arc<dyn DocumentStore>>,
    payments: Option<Arc<dyn PaymentProvider>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            env: RuntimeEnv::default(),
            store_kind: StoreKind::Memory,
            store: None,
            payments: None,
        }
    }

    /// Select the store backend to open in [`build`](Self::build).
    pub fn with_store_kind(mut self, kind: StoreKind) -> Self {
        self.store_kind = kind;
        self
    }

    /// Use an already constructed store; overrides the store kind.
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_payments(mut self, payments: Arc<dyn PaymentProvider>) -> Self {
        self.payments = Some(payments);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let store: Arc<dyn DocumentStore> = match (self.store, self.store_kind) {
            (Some(store), _) => store,
            (None, StoreKind::Memory) => Arc::new(MemoryDocumentStore::new()),
            (None, StoreKind::Postgres) => Arc::new(SeaDocumentStore::new(connect_db().await?)),
        };

        let payments = self
            .payments
            .unwrap_or_else(|| Arc::new(StripeClient::from_env()));

        Ok(AppState::new(store, self.security_config, self.env, payments))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
