use crate::models::IndexResponse;
use crate::response::reply;
use crate::routes;
use axum::{
    http::{HeaderMap, StatusCode, Uri, header},
    response::Response,
};

/// GET / handler - Service metadata
///
/// The `url` field points at the pet collection on the host the client
/// used to reach the service: the `Host` header, else the authority of an
/// absolute request URI, else just the path.
#[utoipa::path(
    get,
    path = routes::INDEX,
    responses(
        (status = 200, description = "Service metadata", body = IndexResponse)
    ),
    tag = "meta"
)]
pub async fn index_handler(headers: HeaderMap, uri: Uri) -> Response {
    let scheme = uri.scheme_str().unwrap_or("http");
    let base = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .map(|host| format!("{}://{}", scheme, host))
        .unwrap_or_default();

    reply(
        StatusCode::OK,
        IndexResponse {
            name: "Pet Demo REST API Service".to_string(),
            version: "1.0".to_string(),
            url: format!("{}{}", base, routes::PETS),
            data: "{name: <string>, category: <string>}".to_string(),
        },
    )
}
