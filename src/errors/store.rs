use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by the credential and issue stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error during {operation}")]
    Database {
        operation: String,
        #[source]
        source: DbErr,
    },

    #[error("user already exists")]
    DuplicateEmail,

    /// Covers both unknown email and wrong password so callers cannot
    /// distinguish the two.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    #[error("issue not found")]
    IssueNotFound,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl StoreError {
    pub fn database(operation: &str, source: DbErr) -> Self {
        StoreError::Database {
            operation: operation.to_string(),
            source,
        }
    }
}

/// Errors surfaced by the token service.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid or malformed token")]
    Invalid,

    #[error("failed to sign token: {0}")]
    Creation(String),
}
