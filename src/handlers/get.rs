use crate::error::{ApiError, ErrorResponse};
use crate::handlers::parse_id;
use crate::models::Pet;
use crate::response::reply;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, response::Response};

/// GET /pets/{id} handler - Retrieve a pet
#[utoipa::path(
    get,
    path = routes::PET_ITEM,
    params(
        ("id" = u64, Path, description = "Pet id")
    ),
    responses(
        (status = 200, description = "Pet found", body = Pet),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id_str)?;
    let key = id.to_string();

    if !state.store.exists(&key).await? {
        tracing::info!("Pet not found with id: {}", id);
        return Err(ApiError::PetNotFound(id));
    }

    let record = state
        .store
        .get(&key)
        .await?
        .ok_or(ApiError::PetNotFound(id))?;
    let pet = Pet::from_record(&key, &record)?;

    tracing::info!("Successfully retrieved pet with id: {}", id);
    Ok(reply(StatusCode::OK, pet))
}
