use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::app_data::AppData;
use crate::errors::{ApiError, FieldError};
use crate::services::TokenService;
use crate::stores::CredentialStore;
use crate::types::dto::auth::{
    AuthResponse, LoginRequest, RegisterApiResponse, RegisterRequest, UserResponse,
};

const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication API endpoints
pub struct AuthApi {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
    dev_mode: bool,
}

#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: app_data.credential_store.clone(),
            token_service: app_data.token_service.clone(),
            dev_mode: app_data.settings.is_development(),
        }
    }

    fn validate_register(body: &RegisterRequest) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if body.name.trim().is_empty() {
            errors.push(FieldError {
                field: "name".to_string(),
                message: "Name is required".to_string(),
            });
        }
        if !is_plausible_email(body.email.trim()) {
            errors.push(FieldError {
                field: "email".to_string(),
                message: "Valid email is required".to_string(),
            });
        }
        if body.password.len() < MIN_PASSWORD_LENGTH {
            errors.push(FieldError {
                field: "password".to_string(),
                message: format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            });
        }
        errors
    }

    fn validate_login(body: &LoginRequest) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if body.email.trim().is_empty() {
            errors.push(FieldError {
                field: "email".to_string(),
                message: "Email is required".to_string(),
            });
        }
        if body.password.is_empty() {
            errors.push(FieldError {
                field: "password".to_string(),
                message: "Password is required".to_string(),
            });
        }
        errors
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account and receive a bearer token
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<RegisterApiResponse, ApiError> {
        let errors = Self::validate_register(&body);
        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        let user = self
            .credential_store
            .create_user(body.name.trim(), body.email.trim(), &body.password)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        let token = self
            .token_service
            .generate(user.id)
            .map_err(ApiError::from_token)?;

        tracing::info!(user_id = user.id, "account registered");

        Ok(RegisterApiResponse::Created(Json(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })))
    }

    /// Login with email and password
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<AuthResponse>, ApiError> {
        let errors = Self::validate_login(&body);
        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        let user = self
            .credential_store
            .verify_credentials(body.email.trim(), &body.password)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        let token = self
            .token_service
            .generate(user.id)
            .map_err(ApiError::from_token)?;

        Ok(Json(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }))
    }

    /// Return the authenticated user's record
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<UserResponse>, ApiError> {
        let user_id = self
            .token_service
            .authorize(&auth.0.token)
            .map_err(ApiError::from_token)?;

        let user = self
            .credential_store
            .find_by_id(user_id)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        Ok(Json(UserResponse::from(user)))
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
