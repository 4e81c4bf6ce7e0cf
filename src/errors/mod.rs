// Errors layer - domain errors (store/token) and their HTTP translation
pub mod api;
pub mod store;

pub use api::{ApiError, ErrorResponse, FieldError};
pub use store::{StoreError, TokenError};
