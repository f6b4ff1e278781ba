use crate::error::{ApiError, ErrorResponse};
use crate::handlers::parse_id;
use crate::response::no_content;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, response::Response};

/// DELETE /pets/{id} handler - Remove a pet
///
/// Always answers 204, whether or not the pet existed.
#[utoipa::path(
    delete,
    path = routes::PET_ITEM,
    params(
        ("id" = u64, Path, description = "Pet id")
    ),
    responses(
        (status = 204, description = "Pet removed (or was already absent)"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id_str)?;
    state.store.delete(&id.to_string()).await?;

    tracing::info!("Deleted pet with id: {}", id);
    Ok(no_content())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorResponse;
    use crate::test_support::{body_json, create_pet, send, setup_test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_delete_endpoint_then_get_is_not_found() {
        let (app, _) = setup_test_app();
        let created = create_pet(&app, "fido", "dog").await;
        let id = created["id"].as_u64().unwrap();

        let response = send(&app, "DELETE", &format!("/pets/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());

        let response = send(&app, "GET", &format!("/pets/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error_response: ErrorResponse = body_json(response).await;
        assert_eq!(error_response.error, format!("Pet {} was not found", id));
    }

    #[tokio::test]
    async fn test_delete_endpoint_is_idempotent() {
        let (app, _) = setup_test_app();
        let created = create_pet(&app, "fido", "dog").await;
        let uri = format!("/pets/{}", created["id"]);

        let first = send(&app, "DELETE", &uri, None).await;
        let second = send(&app, "DELETE", &uri, None).await;

        assert_eq!(first.status(), StatusCode::NO_CONTENT);
        assert_eq!(second.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_endpoint_never_existed() {
        let (app, _) = setup_test_app();

        let response = send(&app, "DELETE", "/pets/999", None).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_endpoint_keeps_counter() {
        let (app, store) = setup_test_app();
        create_pet(&app, "fido", "dog").await;

        let response = send(&app, "DELETE", "/pets/index", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.exists("index").await.unwrap());
    }
}
