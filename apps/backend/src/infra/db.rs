use migration::{migrate, MigrationCommand};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use crate::config::db::db_url;
use crate::error::AppError;

/// Connect to Postgres using the `DB_*` variables and bring the schema up to date.
pub async fn connect_db() -> Result<DatabaseConnection, AppError> {
    let database_url = db_url()?;

    let conn = Database::connect(&database_url)
        .await
        .map_err(|e| AppError::config(format!("cannot connect to document store: {e}")))?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("document store migration failed: {e}")))?;
    info!("document store schema is up to date");

    Ok(conn)
}
