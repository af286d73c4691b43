use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is unset or has no valid entry.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "https://meal-lounge.web.app",
];

/// Parse a comma-separated origin list, keeping only http(s) entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

/// Effective allow-list from `CORS_ALLOWED_ORIGINS`.
pub fn allowed_origins() -> Vec<String> {
    let configured = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());
    if configured.is_empty() {
        DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        configured
    }
}

/// CORS for the browser frontend.
///
/// Credentials are allowed because the session token travels in a cookie.
/// Preflights get back whatever request headers the browser asked for.
pub fn cors_middleware() -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allow_any_header()
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in allowed_origins() {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
