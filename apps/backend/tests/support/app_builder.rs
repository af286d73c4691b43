use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use meal_lounge::config::RuntimeEnv;
use meal_lounge::infra::state::build_state;
use meal_lounge::middleware::request_trace::RequestTrace;
use meal_lounge::middleware::structured_logger::StructuredLogger;
use meal_lounge::middleware::trace_span::TraceSpan;
use meal_lounge::routes;
use meal_lounge::state::app_state::AppState;
use meal_lounge::store::MemoryDocumentStore;
use meal_lounge::{AppError, SecurityConfig};

use super::auth::test_security;
use super::payments::RecordingPayments;

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for creating test Actix service instances
pub struct TestAppBuilder {
    state: AppState,
    route_config: RouteConfigFn,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: Box::new(routes::configure),
        }
    }

    /// Replace the production routes with custom ones
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Box::new(config_fn);
        self
    }

    /// Build the test service with the production middleware chain (minus CORS)
    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        let service = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| route_config(cfg)),
        )
        .await;

        Ok(service)
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}

/// In-memory store and recording payment provider behind a real `AppState`.
/// Keep the handles to seed data and inspect side effects.
pub struct TestContext {
    pub store: Arc<MemoryDocumentStore>,
    pub payments: Arc<RecordingPayments>,
    pub state: AppState,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with(RuntimeEnv::Development, test_security(), RecordingPayments::new()).await
    }

    pub async fn with(
        env: RuntimeEnv,
        security: SecurityConfig,
        payments: RecordingPayments,
    ) -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let payments = Arc::new(payments);

        let state = build_state()
            .with_store(store.clone())
            .with_payments(payments.clone())
            .with_security(security)
            .with_env(env)
            .build()
            .await
            .expect("build test state");

        Self {
            store,
            payments,
            state,
        }
    }

    pub async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        create_test_app(self.state.clone())
            .build()
            .await
            .expect("build test app")
    }
}
