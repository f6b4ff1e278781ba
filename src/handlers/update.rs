use crate::error::{ApiError, ErrorResponse};
use crate::handlers::parse_id;
use crate::models::{Pet, PetPayload};
use crate::response::reply;
use crate::routes;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

/// PUT /pets/{id} handler - Replace a pet's name and category
///
/// The id never changes. Updating a missing pet is a 404; it does not
/// create one.
#[utoipa::path(
    put,
    path = routes::PET_ITEM,
    params(
        ("id" = u64, Path, description = "Pet id")
    ),
    request_body = PetPayload,
    responses(
        (status = 200, description = "Pet updated", body = Pet),
        (status = 400, description = "Invalid id, malformed JSON or invalid pet data", body = ErrorResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = parse_id(&id_str)?;
    let payload = PetPayload::decode(&body)?;
    let key = id.to_string();

    let pet = Pet::new(id, payload);
    if !state.store.update_existing(&key, &pet.to_record()).await? {
        tracing::info!("Pet not found with id: {}", id);
        return Err(ApiError::PetNotFound(id));
    }

    let record = state
        .store
        .get(&key)
        .await?
        .ok_or(ApiError::PetNotFound(id))?;
    let pet = Pet::from_record(&key, &record)?;

    tracing::info!("Successfully updated pet with id: {}", id);
    Ok(reply(StatusCode::OK, pet))
}
