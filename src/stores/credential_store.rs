use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::errors::StoreError;
use crate::types::db::user::{self, Entity as User};

/// CredentialStore persists user records and resolves lookups by id/email.
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a user with an argon2-hashed password.
    ///
    /// Returns `DuplicateEmail` when the email is already taken, either from
    /// the pre-check or from the UNIQUE constraint on a racing insert.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<user::Model, StoreError> {
        let existing = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_user_by_email", e))?;

        if existing.is_some() {
            return Err(StoreError::DuplicateEmail);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?
            .to_string();

        let new_user = user::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        new_user.insert(&self.db).await.map_err(|e| {
            let message = e.to_string();
            if message.contains("UNIQUE") || message.contains("Duplicate") {
                StoreError::DuplicateEmail
            } else {
                StoreError::database("insert_user", e)
            }
        })
    }

    /// Verify an email/password pair.
    ///
    /// Unknown email and wrong password both come back as
    /// `InvalidCredentials`; the caller never learns which one failed.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, StoreError> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_user_by_email", e))?
            .ok_or(StoreError::InvalidCredentials)?;

        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|_| StoreError::InvalidCredentials)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| StoreError::InvalidCredentials)?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<user::Model, StoreError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_user_by_id", e))?
            .ok_or(StoreError::UserNotFound)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, StoreError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_user_by_email", e))
    }
}
