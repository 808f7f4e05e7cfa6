// JSON error responses for HTTP handlers
use crate::application::chart_service::ChartError;
use crate::domain::chart::ParseOptionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Renders as `{"error": "..."}` with the matching status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<ParseOptionError> for ApiError {
    fn from(e: ParseOptionError) -> Self {
        ApiError::bad_request(e.to_string())
    }
}

impl From<ChartError> for ApiError {
    fn from(e: ChartError) -> Self {
        ApiError::bad_request(e.to_string())
    }
}
