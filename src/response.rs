//! Turning handler results into JSON HTTP responses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Serialize `body` as JSON with the given status
///
/// `Content-Type: application/json` is always set.
pub fn reply<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

/// 201 Created with a `Location` header pointing at the new resource
pub fn created<T: Serialize>(location: &str, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location.to_string())],
        Json(body),
    )
        .into_response()
}

/// 204 No Content with an empty body
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
