use clap::Parser;
use migration::{migrate, Database, MigrationCommand};

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Meal Lounge document store migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: String,

    /// Database URL (falls back to DATABASE_URL, then DB_USER/DB_PASS/DB_HOST/DB_PORT/DB_NAME)
    #[arg(long)]
    database_url: Option<String>,
}

fn database_url_from_env() -> Result<String, String> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(url);
    }
    let user = std::env::var("DB_USER").map_err(|_| "DB_USER must be set".to_string())?;
    let pass = std::env::var("DB_PASS").map_err(|_| "DB_PASS must be set".to_string())?;
    let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let name = std::env::var("DB_NAME").unwrap_or_else(|_| "meal_lounge".to_string());
    Ok(format!("postgresql://{user}:{pass}@{host}:{port}/{name}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command: MigrationCommand = match args.command.parse() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let url = match args.database_url.map(Ok).unwrap_or_else(database_url_from_env) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
