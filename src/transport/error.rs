//! HTTP mapping for store errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::utils::error::StoreError;

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::TopicNotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
