use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Converts AppError into an HTTP response with a JSON `{"error": ...}` body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::ValidationFailed(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::StoreUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Store unavailable: {}", msg),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

/// A body that axum could not parse is a validation failure, reported as 400
/// instead of axum's default 415/422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationFailed(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}
