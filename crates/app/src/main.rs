use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "timberdesk={level},server={level},ledger={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect_database(settings.server.database.as_ref()).await?;
    let ledger = ledger::Ledger::new(db);

    if settings.app.seed_demo && ledger::seed::seed_demo(&ledger).await? {
        tracing::info!("demo data seeded into empty database");
    }

    let bind = settings.server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(ledger, listener).await?;

    Ok(())
}

async fn connect_database(
    config: Option<&Database>,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        None | Some(Database::Memory) => String::from("sqlite::memory:"),
        Some(Database::Sqlite { path }) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
