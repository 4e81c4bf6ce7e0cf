use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Server};
use sea_orm::{ConnectOptions, Database};

use bugtrail_backend::api;
use bugtrail_backend::config::{logging, Settings};
use bugtrail_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    logging::init_logging()?;

    let settings = Settings::from_env()?;

    let mut options = ConnectOptions::new(settings.database_url.clone());
    options.max_connections(settings.max_connections);
    let db = Database::connect(options).await?;
    tracing::info!("connected to database");

    Migrator::up(&db, None).await?;
    tracing::info!("database migrations complete");

    let addr = settings.bind_addr();
    let app_data = Arc::new(AppData::init(db, settings));
    let app = api::build_app(app_data);

    tracing::info!(%addr, "starting server");
    tracing::info!("Swagger UI available under /swagger");

    Server::new(TcpListener::bind(addr)).run(app).await?;

    Ok(())
}
