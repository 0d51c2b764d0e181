use axum::{http::StatusCode, response::Response};

use super::{error_response, messages};

/// Fallback for requests that match no route.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, messages::NOT_FOUND)
}


/// Fallback for a known path hit with a method it does not serve.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, messages::METHOD_NOT_ALLOWED)
}
