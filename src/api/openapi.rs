//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, checkout, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book API",
        version = "0.1.0",
        description = "In-memory book catalog REST API"
    ),
    paths(
        health::health_check,
        books::list_books,
        books::get_book,
        books::create_book,
        checkout::checkout_book,
    ),
    components(
        schemas(
            crate::models::Book,
            health::HealthResponse,
            crate::error::MessageResponse,
            crate::error::DecodeErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog and checkout")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
