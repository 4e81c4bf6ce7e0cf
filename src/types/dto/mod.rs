// Request/response models for the HTTP surface
pub mod auth;
pub mod common;
pub mod issues;
