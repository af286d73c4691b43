use actix_web::{web, App, HttpServer};
use meal_lounge::config::{RuntimeEnv, StoreKind};
use meal_lounge::infra::state::build_state;
use meal_lounge::middleware::cors::cors_middleware;
use meal_lounge::middleware::request_trace::RequestTrace;
use meal_lounge::middleware::structured_logger::StructuredLogger;
use meal_lounge::middleware::trace_span::TraceSpan;
use meal_lounge::routes;
use meal_lounge::state::security_config::SecurityConfig;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let env = RuntimeEnv::from_env();
    let security_config = SecurityConfig::from_env();
    if !security_config.has_secret() {
        warn!("ACCESS_TOKEN_SECRET is not set; token issuing will fail and every session is rejected");
    }

    let store_kind = match StoreKind::from_env() {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "invalid store configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_env(env)
        .with_store_kind(store_kind)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(?env, ?store_kind, %host, port, "Meal Lounge server starting");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
