use crate::error::{ApiError, ErrorResponse};
use crate::ids::INDEX_KEY;
use crate::models::{ListQuery, Pet};
use crate::response::reply;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Query, extract::State, http::StatusCode, response::Response};

/// GET /pets handler - List all pets
///
/// Query parameters:
/// - category: only return pets whose category matches exactly (optional;
///   empty means no filter, and only the first occurrence counts)
///
/// Results follow the store's key iteration order, which is unspecified.
#[utoipa::path(
    get,
    path = routes::PETS,
    params(
        ("category" = Option<String>, Query, description = "Only return pets in this category (case-sensitive)")
    ),
    responses(
        (status = 200, description = "List of pets", body = Vec<Pet>),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let query = ListQuery::from_pairs(pairs);
    let mut pets = Vec::new();

    for key in state.store.keys().await? {
        if key == INDEX_KEY {
            continue;
        }
        // Only integer keys are pets
        if key.parse::<u64>().is_err() {
            tracing::debug!("Skipping non-pet key: {}", key);
            continue;
        }

        // Deleted between listing keys and reading it
        let Some(record) = state.store.get(&key).await? else {
            continue;
        };

        let pet = Pet::from_record(&key, &record)?;
        if query.category.as_deref().is_none_or(|c| c == pet.category) {
            pets.push(pet);
        }
    }

    tracing::info!(
        "Listed {} pets (category: {:?})",
        pets.len(),
        query.category
    );

    Ok(reply(StatusCode::OK, pets))
}
