use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::user;

/// Request model for account registration
#[derive(Object, Debug)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,

    /// Email address, unique per account
    pub email: String,

    /// Plaintext password, at least 6 characters
    pub password: String,
}

/// Request model for login
#[derive(Object, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public user fields plus a freshly signed bearer token
#[derive(Object, Debug)]
pub struct AuthResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Public user record, never carries the password hash
#[derive(Object, Debug)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// API response for registration
#[derive(ApiResponse)]
pub enum RegisterApiResponse {
    /// Account created, session token issued
    #[oai(status = 201)]
    Created(Json<AuthResponse>),
}
