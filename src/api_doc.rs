use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{IndexResponse, Pet, PetPayload};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "pet-service API",
        version = "1.0.0",
        description = "A pet records REST API backed by a key-value store"
    ),
    paths(
        handlers::index::index_handler,
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::get::get_handler,
        handlers::create::create_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            Pet,
            PetPayload,
            IndexResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "meta", description = "Service metadata"),
        (name = "health", description = "Health check operations"),
        (name = "pets", description = "Pet record operations")
    )
)]
pub struct ApiDoc;
