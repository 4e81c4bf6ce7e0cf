use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Settings;
use crate::services::TokenService;
use crate::stores::{CredentialStore, IssueStore};

/// Centralized application data following the main-owned stores pattern.
///
/// Everything is created once at startup, wrapped in `Arc<AppData>`, and
/// shared across the API structs. The pooled connection is cloned into each
/// store; no other in-process shared mutable state exists.
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Settings,
    pub credential_store: Arc<CredentialStore>,
    pub issue_store: Arc<IssueStore>,
    pub token_service: Arc<TokenService>,
}

impl AppData {
    pub fn init(db: DatabaseConnection, settings: Settings) -> Self {
        tracing::debug!("creating stores");
        let credential_store = Arc::new(CredentialStore::new(db.clone()));
        let issue_store = Arc::new(IssueStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(
            settings.jwt_secret.clone(),
            settings.jwt_expire_days,
        ));

        Self {
            db,
            settings,
            credential_store,
            issue_store,
            token_service,
        }
    }
}
