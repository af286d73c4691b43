use std::env;

use crate::error::AppError;

/// Which Document Store backs the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Postgres `documents` table via sea-orm
    Postgres,
    /// Process-local store; contents vanish on restart
    Memory,
}

impl StoreKind {
    /// Read `DOCUMENT_STORE` (defaults to postgres).
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("DOCUMENT_STORE").ok().as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => Ok(Self::Postgres),
            Some("memory") => Ok(Self::Memory),
            Some(other) => Err(AppError::config(format!(
                "DOCUMENT_STORE must be 'postgres' or 'memory', got '{other}'"
            ))),
        }
    }
}

/// Builds the store URL from `DB_USER`/`DB_PASS` and optional location variables.
pub fn db_url() -> Result<String, AppError> {
    let username = must_var("DB_USER")?;
    let password = must_var("DB_PASS")?;
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = env::var("DB_NAME").unwrap_or_else(|_| "meal_lounge".to_string());

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::config(format!("{name} must be set")))
}
