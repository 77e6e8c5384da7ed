//! Mapping of manager errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::ManagerError;
use crate::log_component;

/// Wrapper giving [`ManagerError`] an HTTP representation.
///
/// Body: `{"error": <kind>, "data": <offending input>, "message": <text>}`.
/// Runtime and internal errors carry no `data` and use the error's display
/// text as `message`.
#[derive(Debug)]
pub struct ApiError(pub ManagerError);

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_usage_error() {
            log_component!(
                warn,
                "api",
                "Rejected request",
                status = status.as_u16(),
                error = err.to_string()
            );
        } else {
            log_component!(
                error,
                "api",
                "Request failed",
                status = status.as_u16(),
                error = err.to_string()
            );
        }

        let message = err.message().map(str::to_string).unwrap_or_else(|| err.to_string());
        let body = json!({
            "error": err.kind(),
            "data": err.data(),
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}
