// API layer - HTTP endpoints
pub mod auth;
pub mod health;
pub mod issues;

pub use auth::AuthApi;
pub use health::HealthApi;
pub use issues::IssueApi;

use std::sync::Arc;

use poem::http::{Method, StatusCode};
use poem::middleware::Cors;
use poem::{Endpoint, EndpointExt, Response, Route};
use poem_openapi::auth::Bearer;
use poem_openapi::{OpenApiService, SecurityScheme};

use crate::app_data::AppData;

/// JWT bearer authentication for protected routes
#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT")]
pub struct BearerAuth(pub Bearer);

/// Compose the application: API under /api, Swagger UI under /swagger,
/// CORS scoped to the configured frontend origin, and a JSON body for
/// unmatched routes.
pub fn build_app(app_data: Arc<AppData>) -> impl Endpoint {
    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            IssueApi::new(app_data.clone()),
        ),
        "Bugtrail API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/api");
    let ui = api_service.swagger_ui();

    let cors = Cors::new()
        .allow_origin(&app_data.settings.frontend_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(["Content-Type", "Authorization"])
        .allow_credentials(true);

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        // A request without a bearer token fails inside the security scheme;
        // give it the same {message} body as every other auth failure.
        .catch_error(|_: poem_openapi::error::AuthorizationError| async move {
            Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .content_type("application/json")
                .body(r#"{"message":"Missing authentication token"}"#)
        })
        .catch_error(|_: poem::error::NotFoundError| async move {
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .content_type("application/json")
                .body(r#"{"message":"Route not found"}"#)
        })
        .with(cors)
}
