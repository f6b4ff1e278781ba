use crate::error::{ApiError, ErrorResponse};
use crate::ids::next_id;
use crate::models::{Pet, PetPayload};
use crate::response::created;
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, response::Response};

/// POST /pets handler - Create a pet
///
/// The body is decoded and validated before an id is allocated, so rejected
/// requests never consume an id.
#[utoipa::path(
    post,
    path = routes::PETS,
    request_body = PetPayload,
    responses(
        (status = 201, description = "Pet created", body = Pet,
            headers(("Location" = String, description = "URL of the new pet"))),
        (status = 400, description = "Malformed JSON or invalid pet data", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let payload = PetPayload::decode(&body)?;

    let id = next_id(&state.store).await?;
    let pet = Pet::new(id, payload);
    let key = pet.key();
    state.store.set(&key, &pet.to_record()).await?;

    let record = state
        .store
        .get(&key)
        .await?
        .ok_or(ApiError::PetNotFound(id))?;
    let pet = Pet::from_record(&key, &record)?;

    tracing::info!("Created pet with id: {}", id);
    Ok(created(&routes::pet_location(id), pet))
}
