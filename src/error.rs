use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;

use crate::response::reply;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// This error type provides consistent error handling across all endpoints,
/// mapping each failure to an HTTP status code and a `{"error": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Path parameter is not an integer pet id
    InvalidId(String),
    /// Request body is not JSON at all
    MalformedJson(serde_json::Error),
    /// Request body is JSON but not a valid pet
    InvalidPet(String),
    /// No pet stored under this id
    PetNotFound(u64),
    /// Store operation failed
    StoreUnavailable(anyhow::Error),
    /// A stored record could not be read back as a pet
    CorruptRecord { key: String, reason: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidId(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid pet id: expected a non-negative integer, got '{}'", id),
            ),
            ApiError::MalformedJson(err) => (
                StatusCode::BAD_REQUEST,
                format!("Data is not valid: malformed JSON ({})", err),
            ),
            ApiError::InvalidPet(reason) => (
                StatusCode::BAD_REQUEST,
                format!("Data is not valid: {}", reason),
            ),
            ApiError::PetNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Pet {} was not found", id),
            ),
            ApiError::StoreUnavailable(err) => {
                tracing::error!("Store operation failed: {:#}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Store unavailable: {}", err),
                )
            }
            ApiError::CorruptRecord { key, reason } => {
                tracing::error!("Corrupt record at key {}: {}", key, reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Stored pet {} is corrupt: {}", key, reason),
                )
            }
        };

        reply(status, ErrorResponse { error: error_message })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::StoreUnavailable(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => ApiError::InvalidPet(err.to_string()),
            Category::Syntax | Category::Eof | Category::Io => ApiError::MalformedJson(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let (status, body) = render(ApiError::PetNotFound(42)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Pet 42 was not found");
    }

    #[tokio::test]
    async fn test_store_errors_are_unavailable() {
        let err: ApiError = anyhow::anyhow!("connection refused").into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.error.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_json_errors_are_classified() {
        let syntax = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let (status, body) = render(syntax.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.starts_with("Data is not valid: malformed JSON"));

        let data = serde_json::from_str::<u64>("\"seven\"").unwrap_err();
        let (status, body) = render(data.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.starts_with("Data is not valid: invalid type"));
    }

    #[tokio::test]
    async fn test_corrupt_record_is_internal_error() {
        let (status, body) = render(ApiError::CorruptRecord {
            key: "5".to_string(),
            reason: "missing field 'name'".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.contains("missing field 'name'"));
    }
}
