use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::store::{StoreError, TokenError};

/// One failed validation check
#[derive(Object, Debug)]
pub struct FieldError {
    /// Name of the offending request field
    pub field: String,

    /// Why the field was rejected
    pub message: String,
}

/// Standardized error body: `{message}` plus a field list for validation errors
#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub message: String,

    #[oai(skip_serializing_if_is_none)]
    pub errors: Option<Vec<FieldError>>,
}

/// Endpoint-boundary error taxonomy. Store and token errors are converted
/// here before leaving a handler.
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "bad_request_handler")]
pub enum ApiError {
    /// Missing or malformed request fields
    #[oai(status = 400)]
    Validation(Json<ErrorResponse>),

    /// Duplicate email on registration
    #[oai(status = 400)]
    Conflict(Json<ErrorResponse>),

    /// Bad credentials or a missing/invalid/expired token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Referenced resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Anything unexpected; detail withheld outside development mode
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

fn bad_request_handler(err: poem::Error) -> ApiError {
    ApiError::validation_message(err.to_string())
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(Json(ErrorResponse {
            message: "Validation failed".to_string(),
            errors: Some(errors),
        }))
    }

    pub fn validation_message(message: impl Into<String>) -> Self {
        ApiError::Validation(Json(ErrorResponse {
            message: message.into(),
            errors: None,
        }))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(Json(ErrorResponse {
            message: message.into(),
            errors: None,
        }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Json(ErrorResponse {
            message: message.into(),
            errors: None,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorResponse {
            message: message.into(),
            errors: None,
        }))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(Json(ErrorResponse {
            message: message.into(),
            errors: None,
        }))
    }

    /// Translate a store error at the endpoint boundary. `expose_internal`
    /// controls whether database details reach the client (development only).
    pub fn from_store(err: StoreError, expose_internal: bool) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::conflict("User already exists"),
            StoreError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            StoreError::UserNotFound => ApiError::not_found("User not found"),
            StoreError::IssueNotFound => ApiError::not_found("Issue not found"),
            err @ (StoreError::Database { .. } | StoreError::PasswordHash(_)) => {
                tracing::error!(error = %err, "store operation failed");
                if expose_internal {
                    ApiError::internal(format!("Server error: {err}"))
                } else {
                    ApiError::internal("Server error")
                }
            }
        }
    }

    pub fn from_token(err: TokenError) -> Self {
        match err {
            TokenError::Expired => ApiError::unauthorized("Token has expired"),
            TokenError::Invalid => ApiError::unauthorized("Invalid or malformed token"),
            TokenError::Creation(detail) => {
                tracing::error!(%detail, "token signing failed");
                ApiError::internal("Server error")
            }
        }
    }

    /// Get the message carried by this error
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(json)
            | ApiError::Conflict(json)
            | ApiError::Unauthorized(json)
            | ApiError::NotFound(json)
            | ApiError::Internal(json) => &json.0.message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
