use poem_openapi::Object;

/// Response model for the health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Human-readable detail
    pub message: String,
}

/// Generic success message body
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub message: String,
}
