// Services layer - business logic with no HTTP concerns
pub mod token_service;

pub use token_service::TokenService;
