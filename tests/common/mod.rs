// Shared helpers for integration tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use bugtrail_backend::api;
use bugtrail_backend::config::{Environment, Settings};
use bugtrail_backend::AppData;

pub fn test_settings() -> Settings {
    Settings {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        max_connections: 5,
        jwt_secret: "test-secret-key-minimum-32-characters-long".to_string(),
        jwt_expire_days: 7,
        frontend_origin: "http://localhost:5173".to_string(),
        environment: Environment::Development,
    }
}

/// Creates an in-memory test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

#[allow(dead_code)]
pub async fn setup_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::init(db, test_settings()))
}

/// Full application (routes, CORS, 404 handling) over a fresh database
#[allow(dead_code)]
pub async fn test_client() -> poem::test::TestClient<impl poem::Endpoint> {
    poem::test::TestClient::new(api::build_app(setup_app_data().await))
}
