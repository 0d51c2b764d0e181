pub mod codes;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::Error as ObjectIdError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// The response envelope shared by every endpoint.
///
/// Error responses carry only `message`; details are logged server-side and
/// never sent to the client.
///
/// ```json
/// { "message": "bad request" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short, client-facing outcome description
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Input errors render as 400 `bad request`, infrastructure errors as 500
/// `internal server error`. `NotFound` renders the message it carries and an
/// over-limit body renders as 413.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid ObjectId: {0}")]
    ObjectIdError(#[from] ObjectIdError),

    #[error("Query extraction error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Path extraction error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),
}

impl AppError {
    /// Status, log code and client-facing message for this error.
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::SerdeJson(_) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidJson,
                messages::BAD_REQUEST.to_string(),
            ),
            AppError::ValidationError(_) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                messages::BAD_REQUEST.to_string(),
            ),
            AppError::ObjectIdError(_) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidObjectId,
                messages::BAD_REQUEST.to_string(),
            ),
            AppError::QueryRejection(_) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidQuery,
                messages::BAD_REQUEST.to_string(),
            ),
            AppError::PathRejection(_) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidPath,
                messages::BAD_REQUEST.to_string(),
            ),
            AppError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                messages::BAD_REQUEST.to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone()),
            AppError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                messages::INTERNAL_ERROR.to_string(),
            ),
            AppError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorCode::PayloadTooLarge,
                messages::PAYLOAD_TOO_LARGE.to_string(),
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = %self, "Request failed");
        } else {
            tracing::info!(error_code = code.code(), error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Build an envelope response with an arbitrary status.
///
/// ```rust,ignore
/// use axum::http::StatusCode;
/// use axum_helpers::errors::error_response;
///
/// let response = error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
/// ```
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_hides_detail() {
        let response = AppError::BadRequest("title must not be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "bad request" })
        );
    }

    #[tokio::test]
    async fn test_not_found_uses_given_message() {
        let response = AppError::NotFound("order not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "order not found" })
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response =
            AppError::InternalServerError("connection reset by peer".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "internal server error" })
        );
    }

    #[tokio::test]
    async fn test_invalid_object_id_is_bad_request() {
        let err = mongodb::bson::oid::ObjectId::parse_str("not-an-id").unwrap_err();
        let app_error: AppError = err.into();
        assert_eq!(app_error.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_payload_too_large_envelope() {
        let response = AppError::PayloadTooLarge("length limit exceeded".into()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "payload too large" })
        );
    }

    #[test]
    fn test_serde_json_error_is_bad_request() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(AppError::from(err).status(), StatusCode::BAD_REQUEST);
    }
}
