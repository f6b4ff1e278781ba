use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{
    create_handler, delete_handler, get_handler, health_handler, index_handler, list_handler,
    update_handler,
};
use crate::routes;
use crate::state::AppState;

/// Build the full HTTP application over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::INDEX, get(index_handler))
        .route(routes::HEALTH, get(health_handler))
        .route(routes::PETS, get(list_handler).post(create_handler))
        .route(
            routes::PET_ITEM,
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
